use clap::Parser;
use geotag::config::Config;
use geotag::location::{HeadingReading, LocationSource, RecordingPlatform};
use geotag::logging::init_logging;
use geotag::{replay, server, GeotagError};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

/// geotag — EXIF GPS metadata from location callbacks
///
/// Replays recorded platform events (authorization changes, location
/// batches, headings) and prints the resulting GPS metadata as JSON,
/// or hosts a location source over HTTP.
///
/// Examples:
///   geotag events.jsonl
///   geotag events.jsonl --heading 87.5 --tz Europe/Oslo
///   cat events.jsonl | geotag -
///   geotag --serve --port 3030
#[derive(Parser)]
#[command(name = "geotag", version, about, long_about = None)]
struct Cli {
    /// JSON-lines event file, or "-" for stdin.
    #[arg(index = 1)]
    events: Option<String>,

    /// True heading in degrees; overrides any heading event in the stream.
    #[arg(long, allow_hyphen_values = true)]
    heading: Option<f64>,

    /// IANA timezone for the date/time stamps (default: host local time).
    #[arg(long)]
    tz: Option<String>,

    /// Run the HTTP host instead of replaying events.
    #[arg(long)]
    serve: bool,

    /// Bind address for --serve.
    #[arg(long)]
    host: Option<String>,

    /// Port for --serve.
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// Config file (default: ~/.geotag/config.json).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debug logging for geotag itself.
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), GeotagError> {
    // ── Configuration ───────────────────────────────────────────

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if cli.tz.is_some() {
        config.timezone = cli.tz.clone();
    }
    if let Some(host) = &cli.host {
        config.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    let options = config.source_options()?;

    // ── Serve ───────────────────────────────────────────────────

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new()?;
        return runtime.block_on(server::start(&config.host, config.port, options));
    }

    // ── Replay ──────────────────────────────────────────────────

    let Some(events) = cli.events.as_deref() else {
        eprintln!("Error: No event stream specified.");
        eprintln!();
        eprintln!("Usage:");
        eprintln!("  geotag events.jsonl");
        eprintln!("  cat events.jsonl | geotag -");
        eprintln!("  geotag --serve");
        std::process::exit(1);
    };

    let source = LocationSource::new(RecordingPlatform::new(), options);
    let summary = if events == "-" {
        replay::replay(&source, io::stdin().lock())?
    } else {
        replay::replay(&source, BufReader::new(File::open(events)?))?
    };

    let heading = cli
        .heading
        .map(|true_heading| HeadingReading { true_heading })
        .or(summary.heading);
    let md = source.build_gps_metadata(heading);

    if md.is_empty() {
        tracing::warn!(
            authorization = ?source.authorization(),
            has_reading = source.last_reading().is_some(),
            "no GPS metadata available"
        );
    }

    let json = serde_json::to_string_pretty(&md)
        .map_err(|e| GeotagError::Io(io::Error::other(e)))?;
    println!("{}", json);
    Ok(())
}

