use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use issue_resolve_predictor::cli::{normalize, Cli, RunMode, UsageError};
use issue_resolve_predictor::{render, util, Corpus, Engine, Error, Report};

fn run(cli: Cli) -> Result<()> {
  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  util::init_tracing(cli.verbose);

  // Phase 1: normalize CLI (+ config file) and validate eagerly
  let cfg = normalize(cli)?;

  // Phase 2: materialize the corpus
  let corpus = Corpus::load(Path::new(&cfg.corpus))?;
  let engine = Engine::new(&corpus, &cfg.engine)?;

  // Phase 3: evaluate
  let report = match &cfg.mode {
    RunMode::Single { issue } => Report::Single(engine.run_single(issue)?),
    RunMode::Batch { project, percentage, seed } => {
      Report::Batch(engine.run_batch(project, *percentage, *seed, cfg.jobs)?)
    }
  };

  // Phase 4: render and write
  let text = render::render(&report, cfg.format)?;
  util::write_output(&cfg.out, &text).with_context(|| format!("writing report to {}", cfg.out))
}

fn exit_code(err: &anyhow::Error) -> u8 {
  if err.downcast_ref::<UsageError>().is_some() {
    return 2;
  }
  match err.downcast_ref::<Error>() {
    Some(e) if e.is_usage_failure() => 2,
    _ => 1,
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("error: {:#}", err);
      ExitCode::from(exit_code(&err))
    }
  }
}
