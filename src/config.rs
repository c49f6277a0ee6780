use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::FilterState;

/// Default table location, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "shodo_data.csv";

/// Command line and environment configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "shodo-karte", version, about = "書道カウンセリングツール")]
pub struct AppConfig {
    /// CSV table of students.
    #[arg(long, short, env = "SHODO_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// Print the dashboard as JSON and exit instead of opening a window.
    #[arg(long)]
    pub summary: bool,

    /// Keep students whose reason for starting is one of these (repeatable).
    #[arg(long = "reason", value_name = "REASON")]
    pub reasons: Vec<String>,

    /// Keep students whose concerns contain any of these tokens (repeatable).
    #[arg(long = "concern", value_name = "TOKEN")]
    pub concerns: Vec<String>,

    /// Keep students using one of these tools (repeatable).
    #[arg(long = "tool", value_name = "TOOL")]
    pub tools: Vec<String>,

    /// Show the karte of this student.
    #[arg(long)]
    pub name: Option<String>,
}

impl AppConfig {
    /// Initial filter selections taken from the command line.
    pub fn filters(&self) -> FilterState {
        FilterState::new(
            self.reasons.iter().cloned(),
            self.concerns.iter().cloned(),
            self.tools.iter().cloned(),
        )
    }
}
