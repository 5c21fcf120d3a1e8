use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::io::IsTerminal;
use std::path::PathBuf;
use tagmover_core::{
    run, validate_template, Id3TagReader, RunConfig, RunSummary, DEFAULT_PATTERN,
    DEFAULT_TEMPLATE,
};

#[derive(Debug, Parser)]
#[command(name = "tagmover", version)]
#[command(about = "Moves audio files into a directory tree built from their tags")]
struct Cli {
    /// Increase verbosity (repeatable).
    #[arg(short = 'v', action = ArgAction::Count)]
    verbose: u8,
    /// Path template: %a artist, %A album, %t title, %g genre, %n track.
    #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
    template: String,
    /// Only report what would be done.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
    /// Render a missing album as an empty string instead of skipping.
    #[arg(long = "allow_missing_album_info", alias = "allow-missing-album-info")]
    allow_missing_album_info: bool,
    /// Skip files without album info.
    #[arg(long, conflicts_with = "allow_missing_album_info")]
    require_album: bool,
    /// Directory scanned for files [default: current directory].
    #[arg(long)]
    base_dir: Option<PathBuf>,
    /// Directory the rendered paths are created under [default: current directory].
    #[arg(long)]
    target_dir: Option<PathBuf>,
    /// File name pattern to pick up.
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pattern: String,
    /// Copy files instead of moving them.
    #[arg(long, default_value_t = false)]
    use_copy: bool,
    /// Replace whitespace in rendered paths with underscores.
    #[arg(long, default_value_t = false)]
    replace_spaces: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    fn log_level_filter(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn run_config(self) -> Result<RunConfig> {
        let cwd = std::env::current_dir().context("cannot determine current directory")?;
        Ok(RunConfig {
            template: self.template,
            base_dir: self.base_dir.unwrap_or_else(|| cwd.clone()),
            target_dir: self.target_dir.unwrap_or(cwd),
            pattern: self.pattern,
            copy_instead_of_move: self.use_copy,
            dry_run: self.dry_run,
            replace_spaces: self.replace_spaces,
            allow_missing_album: self.allow_missing_album_info || !self.require_album,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level_filter());

    validate_template(&cli.template)
        .with_context(|| format!("invalid template: {:?}", cli.template))?;

    let output = cli.output;
    let config = cli.run_config()?;
    let summary = run(&config, &Id3TagReader)?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Table => print_summary(&summary, config.dry_run),
    }

    Ok(())
}

fn init_logging(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let color = if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    // Stdout carries only the summary.
    if let Err(err) = TermLogger::init(level, config, TerminalMode::Stderr, color) {
        eprintln!("logging unavailable: {err}");
    }
}

fn print_summary(summary: &RunSummary, dry_run: bool) {
    println!(
        "scanned={} placed={} unchanged={} dry_run={} skipped={} unreadable={} failed={}",
        summary.scanned,
        summary.placed,
        summary.unchanged,
        summary.dry_run,
        summary.skipped,
        summary.unreadable,
        summary.failed
    );
    if dry_run {
        println!("dry run: no files were changed");
    }
}
