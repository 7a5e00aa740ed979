use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "devstudio", about = "Run a tiny game development studio from your terminal")]
pub struct Config {
    /// Seed for every random roll, for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write tracing output here. Nothing is logged without it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Host frames per second.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,
}

impl Config {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1_000 / u64::from(self.fps.max(1)))
    }
}
