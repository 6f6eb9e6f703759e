//! CLI command handling for mill

mod selection;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mill_config::config::AppConfig;
use mill_lang_common::InMemoryEditor;
use mill_lang_typescript::{available_actions, Outcome, Refactoring, RefactoringOptions};
use selection::SelectionArgs;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

/// The main CLI struct.
#[derive(Parser)]
#[command(name = "mill")]
#[command(about = "Selection-driven refactorings for TypeScript and JavaScript")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to mill.toml or .mill/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// The available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run one refactoring over a file
    ///
    /// Prints the refactored code unless --write is given.
    ///
    /// Examples:
    ///   mill refactor addBracesToIfStatement src/app.ts --line 3 --column 4
    ///   mill refactor extractVariable src/app.ts --line 2 --column 7 --end-line 2 --end-column 15 --write
    Refactor {
        /// Refactoring key (see `mill list`)
        key: String,

        /// File to refactor
        file: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Write the result back to the file
        #[arg(long)]
        write: bool,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// List every refactoring
    List {
        /// Output format
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// List the refactorings available at a selection
    Actions {
        /// File to inspect
        file: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

pub async fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    mill_config::logging::initialize(&config);
    debug!(config = ?config, "Configuration loaded");

    let options = RefactoringOptions::from(&config);

    match cli.command {
        Commands::Refactor {
            key,
            file,
            selection,
            write,
            format,
        } => handle_refactor(&key, &file, &selection, write, &format, &options).await,
        Commands::List { format } => {
            handle_list(&format)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Actions {
            file,
            selection,
            format,
        } => {
            handle_actions(&file, &selection, &format, &options).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Parser options for `file`, TSX switched on by its extension
fn options_for(file: &Path, options: &RefactoringOptions) -> RefactoringOptions {
    RefactoringOptions {
        parse: options.parse.clone().for_path(file),
        ..options.clone()
    }
}

async fn read_source(file: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))
}

async fn handle_refactor(
    key: &str,
    file: &Path,
    selection: &SelectionArgs,
    write: bool,
    format: &str,
    options: &RefactoringOptions,
) -> anyhow::Result<ExitCode> {
    let refactoring: Refactoring = key.parse()?;
    let code = read_source(file).await?;
    let options = options_for(file, options);

    // The terminal has no rename prompt to hand over to
    let mut editor = InMemoryEditor::new(code)
        .with_selection(selection.selection())
        .without_delegation();
    let outcome = match mill_lang_typescript::run(refactoring, &mut editor, &options).await {
        Ok(outcome) => outcome,
        Err(err) if format == "json" => {
            let output = json!({
                "refactoring": refactoring,
                "file": file.display().to_string(),
                "error": {
                    "category": err.category(),
                    "message": err.to_string(),
                },
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => {
            return Err(anyhow::Error::new(err)
                .context(format!("{} failed on {}", refactoring, file.display())));
        }
    };

    if outcome == Outcome::Applied && write {
        tokio::fs::write(file, editor.current_code())
            .await
            .with_context(|| format!("Failed to write {}", file.display()))?;
    }

    if format == "json" {
        let message = match outcome {
            Outcome::Applied => None,
            Outcome::NotApplicable(reason) => Some(reason.message()),
        };
        let output = json!({
            "refactoring": refactoring,
            "file": file.display().to_string(),
            "outcome": outcome,
            "message": message,
            "code": editor.current_code(),
            "selection": editor.current_selection(),
            "written": write && outcome == Outcome::Applied,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    match outcome {
        Outcome::Applied => {
            if format == "text" {
                if write {
                    eprintln!("✅ {} applied to {}", refactoring.title(), file.display());
                } else {
                    print!("{}", editor.current_code());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Outcome::NotApplicable(reason) => {
            if format == "text" {
                eprintln!("❌ {}", reason);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn handle_list(format: &str) -> anyhow::Result<()> {
    if format == "json" {
        let refactorings: Vec<_> = Refactoring::ALL
            .iter()
            .map(|refactoring| {
                json!({
                    "key": refactoring.key(),
                    "title": refactoring.title(),
                    "actionMessage": refactoring.action_message(),
                    "isPreferred": refactoring.is_preferred(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&refactorings)?);
        return Ok(());
    }

    for refactoring in Refactoring::ALL {
        println!("{:<26} {}", refactoring.key(), refactoring.title());
    }
    Ok(())
}

async fn handle_actions(
    file: &Path,
    selection: &SelectionArgs,
    format: &str,
    options: &RefactoringOptions,
) -> anyhow::Result<()> {
    let code = read_source(file).await?;
    let options = options_for(file, options);
    let actions = available_actions(&code, &selection.selection(), &options)?;

    if format == "json" {
        let actions: Vec<_> = actions
            .iter()
            .map(|refactoring| {
                json!({
                    "key": refactoring.key(),
                    "message": refactoring.action_message(),
                    "isPreferred": refactoring.is_preferred(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&actions)?);
        return Ok(());
    }

    if actions.is_empty() {
        eprintln!("No refactoring available at this selection");
    }
    for refactoring in actions {
        let marker = if refactoring.is_preferred() { "*" } else { " " };
        println!("{} {:<26} {}", marker, refactoring.key(), refactoring.action_message());
    }
    Ok(())
}
