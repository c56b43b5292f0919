use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "lux")]
#[command(about = "An offline Monte Carlo sphere path tracer")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "533")]
    pub height: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "50")]
    pub samples_per_pixel: u32,

    /// Maximum ray bounce depth
    #[arg(long, default_value = "10")]
    pub max_depth: u32,

    /// Master seed for per-row sample generators
    #[arg(long, default_value = "124309")]
    pub seed: u64,

    /// Seed for the procedural scene layout
    #[arg(long, default_value = "609824")]
    pub scene_seed: u64,

    /// Output file path (.ppm for plain text, .png for 8-bit PNG)
    #[arg(short, long, default_value = "image.ppm")]
    pub output: String,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}
