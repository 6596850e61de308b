//! Command line and config file handling.
//!
//! Values come from an optional RON file first; command line flags (and
//! their environment fallbacks) override them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use keyword_engine::DEFAULT_BASE_URL;
use keyword_logging::{LogDestination, DEFAULT_LOG_FILE};
use log::LevelFilter;
use serde::Deserialize;

#[derive(Debug, Parser)]
#[command(name = "kwscout", version, about = "Terminal client for keyword research")]
pub struct Args {
    /// Base URL of the keyword generation server.
    #[arg(long, env = "KWSCOUT_SERVER")]
    pub server: Option<String>,

    /// Directory where exported files are saved.
    #[arg(long)]
    pub download_dir: Option<PathBuf>,

    /// Optional RON config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where log output goes. The terminal is owned by the UI, so `file` is the default.
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
    Off,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
struct FileSettings {
    server: Option<String>,
    download_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server: String,
    pub download_dir: PathBuf,
    pub log: LogDestination,
    pub log_level: LevelFilter,
}

impl Settings {
    pub fn resolve(args: Args) -> anyhow::Result<Self> {
        let file = match args.config.as_deref() {
            Some(path) => load_file_settings(path)?,
            None => FileSettings::default(),
        };

        let server = args
            .server
            .or(file.server)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let download_dir = args
            .download_dir
            .or(file.download_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        let log = match args.log {
            LogTarget::File => LogDestination::File(args.log_file),
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both(args.log_file),
            LogTarget::Off => LogDestination::Off,
        };

        Ok(Self {
            server,
            download_dir,
            log,
            log_level: args.log_level,
        })
    }
}

fn load_file_settings(path: &Path) -> anyhow::Result<FileSettings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    ron::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
