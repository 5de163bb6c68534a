//! eslint-rails core library.
//!
//! Runs ESLint over the JavaScript assets of a Rails project and reports
//! per-file progress plus the collected warnings.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Tool config discovery and ESLint config loading.
//! - `paths`: Target normalization and the descendant test.
//! - `manifest`: Asset listing and logical-name lookup.
//! - `assets`: Asset selection and exclusion patterns.
//! - `engine`: ESLint invocation through a JS host, with autocorrect.
//! - `runner`: The lint pipeline and progress output.
//! - `models`: Warning and severity models.
//! - `output`: Human/JSON report printers.
pub mod assets;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod models;
pub mod output;
pub mod paths;
pub mod runner;
pub mod utils;

pub use error::{Error, Result};
pub use runner::Runner;
