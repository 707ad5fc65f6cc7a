// src/config.rs

use clap::Parser;

use crate::color::Color;
use crate::logging::LoggingConfig;

/// Viewer settings, read from the command line.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(author, version, about = "Golden-ratio shape viewer")]
pub struct ViewerConfig {
    /// Window title
    #[arg(long, default_value = "Golden Shapes")]
    pub title: String,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 768)]
    pub height: u32,

    /// Start with shapes drawn as outlines instead of fills
    #[arg(long, default_value_t = false)]
    pub outline: bool,

    /// Background color, a palette name or #rrggbb
    #[arg(long, default_value = "navy")]
    pub clear_color: Color,

    /// Log filter in env_logger syntax; defaults to RUST_LOG
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl ViewerConfig {
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig { env_filter: self.log_filter.clone() }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::parse_from(["golden_poly"])
    }
}
