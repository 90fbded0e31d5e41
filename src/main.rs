//! `tabular-insight` command line: upload, inspect, clean and download datasets kept in a
//! storage directory.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tabular_insight::ingestion::TracingObserver;
use tabular_insight::workspace::{Workspace, WorkspaceConfig, DEFAULT_ROOT};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tabular-insight")]
#[command(about = "Inspect and clean CSV/xlsx datasets", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding uploaded and cleaned datasets
    #[arg(long, global = true, env = "TABULAR_INSIGHT_DATA_DIR", default_value = DEFAULT_ROOT)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Copy a .csv or .xlsx file into the data directory
    Upload { file: PathBuf },
    /// List stored datasets
    List,
    /// Render the inspection page of a dataset as HTML
    View {
        name: String,
        /// Write the page here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the profile report of a dataset as JSON
    Profile { name: String },
    /// Clean a dataset and store the result as cleaned_<NAME>
    Clean {
        name: String,
        /// none, mean, median, mode or drop; anything else leaves missing values in place
        #[arg(long, default_value = "none")]
        missing_option: String,
        /// Remove duplicate rows after handling missing values
        #[arg(long)]
        remove_duplicates: bool,
    },
    /// Copy a stored dataset out of the data directory
    Download {
        name: String,
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = WorkspaceConfig { root: cli.data_dir };
    let workspace = Workspace::new(config.clone())
        .with_context(|| format!("opening data directory {}", config.root.display()))?
        .with_observer(Arc::new(TracingObserver));

    match cli.command {
        Command::Upload { file } => {
            let name = workspace
                .store(&file)
                .with_context(|| format!("uploading {}", file.display()))?;
            println!("{name}");
        }
        Command::List => {
            for name in workspace.list().context("listing datasets")? {
                println!("{name}");
            }
        }
        Command::View { name, out } => {
            let inspection = workspace
                .inspect(&name)
                .with_context(|| format!("inspecting {name}"))?;
            let page = inspection.view.to_page(&inspection.filename);
            match out {
                Some(path) => std::fs::write(&path, page)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => print!("{page}"),
            }
        }
        Command::Profile { name } => {
            let inspection = workspace
                .inspect(&name)
                .with_context(|| format!("profiling {name}"))?;
            println!("{}", inspection.report.to_json()?);
        }
        Command::Clean {
            name,
            missing_option,
            remove_duplicates,
        } => {
            let cleaned = workspace
                .clean_form(&name, Some(&missing_option), remove_duplicates)
                .with_context(|| format!("cleaning {name}"))?;
            println!("{cleaned}");
        }
        Command::Download { name, out } => {
            let bytes = workspace
                .download(&name)
                .with_context(|| format!("downloading {name}"))?;
            std::fs::write(&out, bytes).with_context(|| format!("writing {}", out.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn tmp_data_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("tabular-insight-cli-{nanos}"))
    }

    fn run_args(data_dir: &std::path::Path, args: &[&str]) -> Result<()> {
        let mut argv = vec!["tabular-insight", "--data-dir"];
        argv.push(data_dir.to_str().unwrap());
        argv.extend_from_slice(args);
        run(Cli::try_parse_from(argv)?)
    }

    #[test]
    fn unknown_missing_option_cleans_as_none() {
        let dir = tmp_data_dir();
        run_args(&dir, &["upload", "tests/fixtures/data.csv"]).unwrap();
        run_args(&dir, &["clean", "data.csv", "--missing-option", "bogus"]).unwrap();

        let cleaned = std::fs::read_to_string(dir.join("cleaned_data.csv")).unwrap();
        assert_eq!(cleaned, "age,city\n25,NY\n,NY\n30,LA\n");

        let _ = std::fs::remove_dir_all(dir);
    }
}
