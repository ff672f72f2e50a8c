//! Command-line tool over a `projects` record store.
//!
//! # Responsibility
//! - Construct a store from flags or environment and run one operation.
//! - Print results as JSON for quick local inspection.

mod project;

use clap::{Parser, Subcommand};
use filestore_core::{
    core_version, default_log_level, init_logging, RecordRepository, RecordStore, StoreConfig,
};
use log::info;
use project::Project;
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "filestore", version, about = "Inspect and edit a JSON record store")]
struct Cli {
    /// Directory holding the store files. Defaults to ~/file-database.
    #[arg(long, env = "FILESTORE_BASE_DIR")]
    base_dir: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Skip fsync after each rewrite.
    #[arg(long)]
    no_sync: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every stored project.
    List,
    /// Print one project by id.
    Get { id: String },
    /// Insert a project, or replace an identical one.
    Put { id: String, name: String },
    /// Append every project from a JSON array file.
    Import { file: PathBuf },
    /// Remove the first project with this id.
    Delete { id: String },
    /// Print the core version.
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    match run(cli, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(default_log_level(), log_dir)?;
    }

    if let Command::Version = cli.command {
        writeln!(out, "filestore_core {}", core_version())?;
        return Ok(());
    }

    let config = match cli.base_dir {
        Some(dir) => StoreConfig::new(dir),
        None => StoreConfig::from_env()?,
    }
    .with_durable_writes(!cli.no_sync);
    let store: RecordStore<Project> = RecordStore::new(config);
    info!(
        "event=cli_command module=cli status=start path={}",
        store.path().display()
    );

    match cli.command {
        Command::List => {
            writeln!(out, "{}", serde_json::to_string_pretty(&store.find_all())?)?;
        }
        Command::Get { id } => match store.find_by_id(&id)? {
            Some(project) => writeln!(out, "{}", serde_json::to_string_pretty(&project)?)?,
            None => return Err(format!("project not found: {id}").into()),
        },
        Command::Put { id, name } => {
            if id.is_empty() {
                return Err("project id must not be empty".into());
            }
            store.save(&Project { id, name });
        }
        Command::Import { file } => {
            let projects: Vec<Project> = serde_json::from_slice(&std::fs::read(&file)?)?;
            store.save_all(&projects)?;
            writeln!(out, "imported {} project(s)", projects.len())?;
        }
        Command::Delete { id } => store.delete_by_id(&id)?,
        Command::Version => {}
    }
    Ok(())
}
