//! test-support: helpers for robust, nextest-friendly tests.
//!
//! Add as a dev-dependency in your top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support", features = ["serde"] }
//! ```
//!
//! Then in tests:
//! ```rust
//! use test_support::{init_tracing, fixture_path};
//!
//! #[test]
//! fn example() {
//!     init_tracing();
//!     let _corpus = fixture_path("corpus.json");
//! }
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

use std::path::{Path, PathBuf};

/// Name of the binary target under test.
pub const BIN: &str = "issue-resolve-predictor";

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,issue_resolve_predictor=info"))
            .unwrap();
        // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Return the path to the repository's `tests/fixtures` directory.
///
/// Resolved from this crate's manifest (`tests/support`), so it's stable regardless
/// of the runner's working directory (cargo vs nextest).
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("fixtures")
}

/// Absolute path of a fixture file, panicking early when it is missing.
pub fn fixture_path<P: AsRef<Path>>(rel_path: P) -> PathBuf {
    let path = fixtures_dir().join(rel_path);
    assert!(path.exists(), "missing fixture {}", path.display());
    path
}

/// Deserialize a JSON fixture into `T` (enable `serde` feature).
#[cfg(feature = "serde")]
pub fn read_fixture_json<T, P>(rel_path: P) -> T
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = fixtures_dir().join(rel_path);
    let file = std::fs::File::open(&path)
        .unwrap_or_else(|e| panic!("failed to open fixture {}: {e}", path.display()));
    serde_json::from_reader::<_, T>(file)
        .unwrap_or_else(|e| panic!("failed to parse JSON fixture {}: {e}", path.display()))
}

/// Create a temp directory that deletes on drop.
pub fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create tempdir")
}

/// Write `value` as `<name>` inside a fresh temp dir; keep the dir alive while the file is used.
#[cfg(feature = "serde")]
pub fn write_json(name: &str, value: &serde_json::Value) -> (tempfile::TempDir, PathBuf) {
    let td = tempdir();
    let path = td.path().join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(value).expect("serialize"))
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
    (td, path)
}

/// Run the binary target with `assert_cmd`, returning the ready-to-run `Command`.
///
/// Example:
/// ```
/// use test_support::cmd_bin;
///
/// let mut cmd = cmd_bin();
/// cmd.arg("--help").assert().success();
/// ```
pub fn cmd_bin() -> assert_cmd::Command {
    init_tracing();
    assert_cmd::Command::cargo_bin(BIN).expect("binary target not found")
}

/// `cmd_bin()` pre-loaded with `--corpus <fixture>`.
pub fn cmd_with_corpus(fixture: &str) -> assert_cmd::Command {
    let mut cmd = cmd_bin();
    cmd.arg("--corpus").arg(fixture_path(fixture));
    cmd
}
