use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rendercollect", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Collect render output of every instance in a publish session.
    Collect(CollectArgs),
    /// Print the next free version of a working file.
    VersionUp(PathArgs),
    /// List autosaves of a working file, oldest first.
    Autosaves(PathArgs),
}

#[derive(Parser, Debug)]
struct CollectArgs {
    /// Input session JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output report JSON. Printed to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PathArgs {
    path: PathBuf,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Collect(args) => cmd_collect(args),
        Command::VersionUp(args) => {
            let next = rendercollect::version_up(&args.path)?;
            println!("{}", next.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Autosaves(args) => {
            for path in rendercollect::autosave_files(&args.path)? {
                println!("{}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_session_json(path: &Path) -> anyhow::Result<rendercollect::SessionFile> {
    let f = File::open(path).with_context(|| format!("open session '{}'", path.display()))?;
    let r = BufReader::new(f);
    let session: rendercollect::SessionFile =
        serde_json::from_reader(r).with_context(|| "parse session JSON")?;
    Ok(session)
}

fn cmd_collect(args: CollectArgs) -> anyhow::Result<ExitCode> {
    let session = read_session_json(&args.in_path)?;
    let report = rendercollect::run_session(session);
    let json = serde_json::to_string_pretty(&report).context("serialize report")?;

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, json.as_bytes())
                .with_context(|| format!("write report '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("write report to stdout")?;
        }
    }

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        for failure in &report.failures {
            eprintln!("failed {}: {}", failure.instance, failure.message);
        }
        Ok(ExitCode::FAILURE)
    }
}
