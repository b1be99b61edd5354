mod augmenter;
mod config;
mod document;
mod error;
mod i18n;
mod report;
mod session;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use i18n::I18n;
use session::Session;

#[derive(Parser)]
#[command(name = "songfill", version)]
#[command(about = "Fill missing Chinese song text in localization JSON from the English text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a JSON file, fill missing Chinese text of song items, review and save
    Fill(FillArgs),
    /// Print the cleaned form of a piece of text
    Clean {
        text: String,
    },
}

#[derive(Args)]
struct FillArgs {
    /// Input file (JSON with a top-level `items` array)
    file: PathBuf,
    /// Save without asking for confirmation
    #[arg(long, short = 'y')]
    yes: bool,
    /// Show the report only, never write
    #[arg(long = "dry-run", short = 'n')]
    dry_run: bool,
    /// Write to this path instead of overwriting the input file
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
    /// Only print the summary counters
    #[arg(long = "no-details")]
    no_details: bool,
}

/// How a `fill` run ended.
#[derive(Debug, PartialEq, Eq)]
enum FillOutcome {
    DryRun,
    NothingToSave,
    Declined,
    Saved(PathBuf),
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("SONGFILL_LOG")
                .unwrap_or_else(|_| "songfill=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fill(args) => {
            let config = Config::new()?;
            let i18n = I18n::new(config.get_effective_language());
            run_fill(&args, &config, &i18n, |target| confirm_save(&i18n, target))?;
        }
        Commands::Clean { text } => {
            println!("{}", augmenter::clean_text(&text));
        }
    }

    Ok(())
}

/// Open, report, and (unless this is a dry run or nothing changed) save.
/// `confirm` is asked before writing when the config or `--yes` requires it.
fn run_fill<F>(args: &FillArgs, config: &Config, i18n: &I18n, mut confirm: F) -> Result<FillOutcome>
where
    F: FnMut(&Path) -> Result<bool>,
{
    let session = Session::open(&args.file).context(i18n.t("load_failed"))?;
    let item_count = session.document().items().map_or(0, Vec::len);
    println!(
        "{}",
        i18n.t_format("load_success", &[&args.file.display().to_string(), &item_count.to_string()])
            .green()
    );
    println!();
    println!(
        "{}",
        report::render(session.report(), i18n, config.display.show_details && !args.no_details)
    );
    println!();

    if args.dry_run {
        println!("{}", i18n.t("dry_run_notice").yellow());
        return Ok(FillOutcome::DryRun);
    }
    if !session.has_changes() {
        println!("{}", i18n.t("nothing_to_save").yellow());
        return Ok(FillOutcome::NothingToSave);
    }

    let target = args.output.clone().unwrap_or_else(|| session.path().to_path_buf());
    let needs_confirm = config.save.confirm && !args.yes;
    if needs_confirm && !confirm(target.as_path())? {
        println!("{}", i18n.t("save_aborted").yellow());
        return Ok(FillOutcome::Declined);
    }

    let saved = match &args.output {
        Some(path) => session.save_as(path),
        None => session.save(),
    };
    saved.context(i18n.t("save_failed"))?;
    println!("{}", i18n.t_format("save_success", &[&target.display().to_string()]).green().bold());
    Ok(FillOutcome::Saved(target))
}

fn confirm_save(i18n: &I18n, target: &Path) -> Result<bool> {
    print!("{}", i18n.t_format("confirm_save_prompt", &[&target.display().to_string()]).yellow());
    io::stdout().flush().ok();
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return Ok(false);
    }
    let trimmed = input.trim().to_lowercase();
    Ok(trimmed == "yes" || trimmed == "y")
}
