//! eslint-rails CLI binary entry point.
//! Delegates to the library for config, linting and reporting.

use clap::Parser;
use eslint_rails::cli::{Cli, Commands};
use eslint_rails::config::{self, EslintConfig};
use eslint_rails::models::Severity;
use eslint_rails::utils::{error_prefix, note_prefix};
use eslint_rails::{logging, output, Result, Runner};
use std::io;

fn main() {
    logging::init();
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            2
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
        Commands::Lint {
            path,
            fix,
            repo_root,
            output,
            config: eslint_config,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                output.as_deref(),
                eslint_config.as_deref(),
            )?;
            if !eff.config_found && eff.output != "json" {
                eprintln!(
                    "{} No eslint-rails.toml found; using defaults.",
                    note_prefix()
                );
            }
            let runner = Runner::for_project(path.unwrap_or_default(), &eff)?;
            // Keep stdout pure JSON; progress goes to stderr in that mode.
            let warnings = if eff.output == "json" {
                runner.run_to(fix, &mut io::stderr().lock())?
            } else {
                runner.run(fix)?
            };
            output::print_report(&warnings, runner.assets().len(), &eff.output);
            let failed = warnings.iter().any(|w| w.severity == Severity::High);
            Ok(i32::from(failed))
        }
        Commands::PrintConfig {
            repo_root,
            config: eslint_config,
            default,
        } => {
            let eff =
                config::resolve_effective(repo_root.as_deref(), None, eslint_config.as_deref())?;
            let cfg = if default {
                EslintConfig::default_config()?
            } else {
                EslintConfig::read(&eff.eslint_config)?
            };
            println!("{}", serde_json::to_string_pretty(&cfg.value)?);
            Ok(0)
        }
    }
}
