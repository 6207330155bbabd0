use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use textgrid_karaoke::{
    build_report, read_textgrid, write_ass, KaraokeConfig, KaraokeConverterBuilder, KaraokeError,
    WordSpacing,
};

#[path = "textgrid_to_ass/report_formatter.rs"]
mod report_formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SpacingChoice {
    /// Space after every word (Latin, Cyrillic, ...).
    Spaced,
    /// No separator between words (Chinese, Japanese, ...).
    Unspaced,
}

impl From<SpacingChoice> for WordSpacing {
    fn from(choice: SpacingChoice) -> Self {
        match choice {
            SpacingChoice::Spaced => WordSpacing::Spaced,
            SpacingChoice::Unspaced => WordSpacing::Unspaced,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "textgrid_to_ass")]
#[command(about = "Convert a forced-alignment TextGrid word tier into a karaoke ASS subtitle file")]
struct Args {
    /// Input TextGrid file (UTF-8 or UTF-16).
    input: PathBuf,
    /// Output ASS file.
    output: PathBuf,
    /// JSON file with conversion parameters; flags given on the command line win.
    #[arg(long, env = "TEXTGRID_KARAOKE_CONFIG")]
    config: Option<PathBuf>,
    /// Tier to extract [default: words]
    #[arg(long, env = "TEXTGRID_KARAOKE_TIER")]
    tier: Option<String>,
    /// Style name used for every event [default: Default]
    #[arg(long, env = "TEXTGRID_KARAOKE_STYLE")]
    style: Option<String>,
    /// Substring marking candidate phrase boundaries [default: <eps>]
    #[arg(long, env = "TEXTGRID_KARAOKE_PHRASE_MARKER")]
    phrase_marker: Option<String>,
    /// Minimum seconds between the end of a phrase and a marker that opens the next [default: 2.0]
    #[arg(long, env = "TEXTGRID_KARAOKE_MIN_PHRASE_GAP")]
    min_phrase_gap: Option<f64>,
    /// Target maximum phrase duration in seconds [default: 5.0]
    #[arg(long, env = "TEXTGRID_KARAOKE_TARGET_DURATION")]
    target_duration: Option<f64>,
    /// Seconds added to every phrase start; negative shows lines earlier [default: 0.0]
    #[arg(
        long,
        env = "TEXTGRID_KARAOKE_SHIFT_TIME",
        allow_negative_numbers = true
    )]
    shift_time: Option<f64>,
    /// Separator policy after each word [default: spaced]
    #[arg(long, env = "TEXTGRID_KARAOKE_WORD_SPACING", value_enum)]
    word_spacing: Option<SpacingChoice>,
    /// Write a JSON summary of the generated phrases.
    #[arg(long, env = "TEXTGRID_KARAOKE_REPORT")]
    report: Option<PathBuf>,
}

enum Outcome {
    Converted,
    TierMissing,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(Outcome::Converted) => ExitCode::SUCCESS,
        Ok(Outcome::TierMissing) => ExitCode::from(2),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<Outcome, String> {
    let config = resolve_config(&args)?;
    let converter = KaraokeConverterBuilder::new(config)
        .build()
        .map_err(|err| format!("Invalid conversion parameters: {err}"))?;
    let config = converter.config();

    let tiers = read_textgrid(&args.input).map_err(|err| err.to_string())?;
    let tier = match tiers.into_tier(&config.tier) {
        Ok(tier) => tier,
        Err(KaraokeError::TierNotFound {
            requested,
            available,
        }) => {
            let available = available
                .iter()
                .map(|name| format!("\"{name}\""))
                .collect::<Vec<_>>()
                .join(", ");
            println!("Tier \"{requested}\" not found. Available tiers: {available}");
            return Ok(Outcome::TierMissing);
        }
        Err(err) => return Err(err.to_string()),
    };

    let track = converter.convert(&tier.intervals);
    write_ass(&args.output, &track.lines, &config.style).map_err(|err| {
        format!(
            "Failed to write subtitle file '{}': {err}",
            args.output.display()
        )
    })?;

    if let Some(report_path) = args.report.as_ref() {
        let report = build_report(
            &display(&args.input),
            &display(&args.output),
            config,
            tier.intervals.len(),
            &track,
        );
        report_formatter::write_report(report_path, &report)?;
    }

    println!(
        "Successfully converted \"{}\" to \"{}\" using tier \"{}\"",
        args.input.display(),
        args.output.display(),
        config.tier
    );
    println!(
        "Phrases are grouped with \"{}\" markers with a minimum gap of {:?}s",
        config.phrase_marker, config.min_phrase_gap
    );
    println!("Target maximum phrase duration: {:?}s", config.target_duration);
    if config.shift_time != 0.0 {
        println!("Phrase starts shifted by {:?}s", config.shift_time);
    }
    println!(
        "Wrote {} karaoke line(s) from {} word(s) with \\K timing tags for each word",
        track.lines.len(),
        track.word_count()
    );
    if let Some(report_path) = args.report.as_ref() {
        println!("Report: {}", report_path.display());
    }

    Ok(Outcome::Converted)
}

fn resolve_config(args: &Args) -> Result<KaraokeConfig, String> {
    let mut config = match args.config.as_ref() {
        Some(path) => KaraokeConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => KaraokeConfig::default(),
    };

    if let Some(tier) = args.tier.as_ref() {
        config.tier = tier.clone();
    }
    if let Some(style) = args.style.as_ref() {
        config.style = style.clone();
    }
    if let Some(marker) = args.phrase_marker.as_ref() {
        config.phrase_marker = marker.clone();
    }
    if let Some(gap) = args.min_phrase_gap {
        config.min_phrase_gap = gap;
    }
    if let Some(target) = args.target_duration {
        config.target_duration = target;
    }
    if let Some(shift) = args.shift_time {
        config.shift_time = shift;
    }
    if let Some(spacing) = args.word_spacing {
        config.word_spacing = spacing.into();
    }
    Ok(config)
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
