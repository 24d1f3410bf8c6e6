use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::plot::ImageFormat;
use crate::scan::NO_SIGNAL_DBM;

/// Central configuration loaded from environment variables.
///
/// A .env file in the working directory is loaded at startup via dotenvy,
/// so these can live there instead of the shell.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scan file to analyze when none is given on the command line
    pub scan_file: PathBuf,
    /// Directory where charts and reports are written
    pub output_dir: PathBuf,
    /// Value substituted for access points not seen in a scan (dBm)
    pub no_signal_dbm: f64,
    /// Number of histogram subplots per grid row
    pub subplots_per_row: usize,
    /// Format for default chart output paths
    pub image_format: ImageFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan_file: PathBuf::from("./both.txt"),
            output_dir: PathBuf::from("./output"),
            no_signal_dbm: NO_SIGNAL_DBM,
            subplots_per_row: 3,
            image_format: ImageFormat::Png,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every setting has a default; only malformed values are an error.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any `WIFILOC_*` key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let no_signal_dbm = match lookup("WIFILOC_NO_SIGNAL_DBM") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .with_context(|| format!("WIFILOC_NO_SIGNAL_DBM is not a number: {raw:?}"))?,
            None => defaults.no_signal_dbm,
        };

        let subplots_per_row = match lookup("WIFILOC_SUBPLOTS_PER_ROW") {
            Some(raw) => raw.trim().parse::<usize>().with_context(|| {
                format!("WIFILOC_SUBPLOTS_PER_ROW is not a whole number: {raw:?}")
            })?,
            None => defaults.subplots_per_row,
        };
        if subplots_per_row == 0 {
            anyhow::bail!("WIFILOC_SUBPLOTS_PER_ROW must be at least 1");
        }

        let image_format = match lookup("WIFILOC_IMAGE_FORMAT") {
            Some(raw) => ImageFormat::parse(raw.trim())?,
            None => defaults.image_format,
        };

        Ok(Self {
            scan_file: lookup("WIFILOC_SCAN_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.scan_file),
            output_dir: lookup("WIFILOC_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            no_signal_dbm,
            subplots_per_row,
            image_format,
        })
    }

    /// Pick the scan file: a command-line path wins over the configured one.
    pub fn scan_file_or(&self, cli_path: Option<&Path>) -> PathBuf {
        cli_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.scan_file.clone())
    }

    /// Default path for a named chart inside the output directory.
    pub fn chart_path(&self, stem: &str) -> PathBuf {
        self.output_dir
            .join(format!("{stem}.{}", self.image_format.extension()))
    }

    /// Make sure the configured scan file exists before trying to parse it.
    pub fn require_scan_file(path: &Path) -> Result<()> {
        if !path.exists() {
            anyhow::bail!(
                "Scan file not found: {}\n\
                 Pass a path on the command line or set WIFILOC_SCAN_FILE in your .env file.",
                path.display()
            );
        }
        Ok(())
    }
}
