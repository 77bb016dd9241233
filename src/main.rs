use std::path::PathBuf;
use std::process::ExitCode;

use chrono::DateTime;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use thiserror::Error;

use geotrace::interpolate::{Bounds, InterpolateError, InterpolationOptions, Kind};
use geotrace::parser::ParseError;
use geotrace::{
    config::ConfigError, util, BiometricInterpolator, BiometricSeriesParser, Config,
    ElevationGridParser, Interpolator, RecordParser, Source, TrackInterpolator, TrackLogParser,
};

#[derive(Parser)]
#[command(name = "geotrace")]
#[command(about = "Normalize track logs, heart-rate exports and elevation grids")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
enum Format {
    /// GPX 1.1 track log
    Track,
    /// Fitbit intraday heart-rate JSON
    Heart,
    /// GSI DEM GML document or zip of documents
    Grid,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a source and print its records as JSON
    Parse { format: Format, source: String },
    /// Show the fields, record count and interpolation domain of a source
    Info { format: Format, source: String },
    /// Evaluate the interpolated series at the given times
    Sample {
        format: Format,
        source: String,
        /// Epoch milliseconds or RFC 3339 timestamps
        #[arg(required = true)]
        at: Vec<String>,
        #[arg(long)]
        kind: Option<Kind>,
        #[arg(long)]
        bounds: Option<Bounds>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("interpolation error: {0}")]
    Interpolate(#[from] InterpolateError),
    #[error("output error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid query time {0:?}")]
    Query(String),
    #[error("{0} records are not time-indexed")]
    NotTimeIndexed(Format),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let codec = config.codec()?;
    let track = TrackLogParser::with_codec(codec);
    let heart = BiometricSeriesParser::with_codec(codec);
    let grid = ElevationGridParser::new();

    match cli.command {
        Commands::Parse { format, source } => match format {
            Format::Track => print_records(&parse(&track, &source)?),
            Format::Heart => print_records(&parse(&heart, &source)?),
            Format::Grid => print_records(&parse(&grid, &source)?),
        },
        Commands::Info { format, source } => {
            let options = config.interpolation;
            match format {
                Format::Track => {
                    let points = parse(&track, &source)?;
                    print_header(format, track.fields(), points.len());
                    let ip = TrackInterpolator::with_options(&points, options)?;
                    println!("domain: {:?}", ip.domain());
                    println!("lat_range: {:?}", ip.lat_range());
                    println!("lon_range: {:?}", ip.lon_range());
                    println!("alt_range: {:?}", ip.alt_range());
                }
                Format::Heart => {
                    let samples = parse(&heart, &source)?;
                    print_header(format, heart.fields(), samples.len());
                    let ip = BiometricInterpolator::with_options(&samples, options)?;
                    println!("domain: {:?}", ip.domain());
                    println!("range: {:?}", ip.range());
                }
                Format::Grid => {
                    let cells = parse(&grid, &source)?;
                    print_header(format, grid.fields(), cells.len());
                }
            }
            Ok(())
        }
        Commands::Sample {
            format,
            source,
            at,
            kind,
            bounds,
        } => {
            let mut options: InterpolationOptions = config.interpolation;
            if let Some(kind) = kind {
                options.kind = kind;
            }
            if let Some(bounds) = bounds {
                options.bounds = bounds;
            }
            let times = at
                .iter()
                .map(|s| parse_query(s))
                .collect::<Result<Vec<_>, _>>()?;

            match format {
                Format::Track => {
                    let ip = TrackInterpolator::with_options(&parse(&track, &source)?, options)?;
                    print_samples(&ip, &times)
                }
                Format::Heart => {
                    let ip = BiometricInterpolator::with_options(&parse(&heart, &source)?, options)?;
                    print_samples(&ip, &times)
                }
                Format::Grid => Err(CliError::NotTimeIndexed(format)),
            }
        }
    }
}

/// `-` reads the source from stdin.
fn parse<P: RecordParser>(parser: &P, source: &str) -> Result<Vec<P::Record>, ParseError> {
    if source == "-" {
        parser.parse(Source::reader(std::io::stdin().lock()))
    } else {
        parser.parse(Source::Str(source))
    }
}

fn parse_query(s: &str) -> Result<f64, CliError> {
    if util::is_numeric(s) {
        return s.trim().parse().map_err(|_| CliError::Query(s.to_string()));
    }
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.timestamp_millis() as f64)
        .map_err(|_| CliError::Query(s.to_string()))
}

fn print_header(format: Format, fields: &[&str], count: usize) {
    println!("format: {}", format);
    println!("fields: {}", fields.join(", "));
    println!("records: {}", count);
}

fn print_records<T: Serialize>(records: &[T]) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}

#[derive(Serialize)]
struct SampleLine<T> {
    t: f64,
    value: T,
}

fn print_samples<I>(ip: &I, times: &[f64]) -> Result<(), CliError>
where
    I: Interpolator,
    I::Output: Serialize,
{
    for &t in times {
        let value = ip.call(t)?;
        println!("{}", serde_json::to_string(&SampleLine { t, value })?);
    }
    Ok(())
}
