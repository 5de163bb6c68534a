//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "eslint-rails",
    version,
    about = "Run ESLint over a Rails project's JavaScript assets",
    long_about = "eslint-rails resolves a file or directory under the JavaScript asset root, lints every selected asset with the project's ESLint bundle, and reports the results.\n\nConfiguration precedence: CLI > eslint-rails.toml > defaults.",
    after_help = "Examples:\n  eslint-rails lint\n  eslint-rails lint components/widget\n  eslint-rails lint app/assets/javascripts/application.js --fix\n  eslint-rails print-config",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current eslint-rails version.")]
    Version,
    /// Lint assets under a file or directory
    #[command(
        about = "Run ESLint",
        long_about = "Lint the JavaScript assets under PATH (default: the whole asset root). With --fix, fixable problems are rewritten in place and only the remaining warnings are reported.",
        after_help = "Examples:\n  eslint-rails lint components\n  eslint-rails lint widgets/form --fix --output json"
    )]
    Lint {
        #[arg(help = "File or directory, relative to the asset root (default: all assets)")]
        path: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Apply ESLint autocorrections to files on disk")]
        fix: bool,
        #[arg(long, help = "Project root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, value_parser = ["human", "json"], help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Path to the ESLint JSON config (default: config/eslint.json)")]
        config: Option<String>,
    },
    /// Print the ESLint configuration in effect
    #[command(
        about = "Print ESLint config",
        long_about = "Print the ESLint configuration that lint would use, as pretty JSON."
    )]
    PrintConfig {
        #[arg(long, help = "Project root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Path to the ESLint JSON config (default: config/eslint.json)")]
        config: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Ignore the project config and print the built-in default")]
        default: bool,
    },
}
