//! Predict how long an issue will take to resolve for each candidate assignee,
//! from the text similarity between the issue and that assignee's resolved history.
//!
//! Pipeline per target issue: [`filter`] → [`aggregate`] (over [`similarity`]) →
//! [`predict`] → [`evaluate`], driven by [`engine::Engine`] over an
//! [`corpus::IssueRepository`].

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod ext;
pub mod filter;
pub mod model;
pub mod predict;
pub mod render;
pub mod similarity;
pub mod util;

pub use config::EngineConfig;
pub use corpus::{Corpus, IssueRepository};
pub use engine::{BatchReport, Engine, Report, TargetReport};
pub use error::{Error, Result};
