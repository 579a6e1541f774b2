use crate::game::DEFAULT_GRID_SIZE;
use crate::high_score::JsonFileStore;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(name = "snake-arcade", about = "Grid snake with a persistent high score")]
pub struct Args {
    /// Cells per side of the square board.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE, value_parser = clap::value_parser!(u16).range(4..=64))]
    pub grid_size: u16,

    /// Pixels per cell.
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u32).range(8..=48))]
    pub cell_size: u32,

    /// Seed for food placement; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where the high score is kept.
    #[arg(long)]
    pub high_score_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    pub log: String,
}

impl Args {
    pub fn high_score_path(&self) -> PathBuf {
        self.high_score_file
            .clone()
            .or_else(JsonFileStore::default_path)
            .unwrap_or_else(|| PathBuf::from("high_score.json"))
    }

    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log));
        // A subscriber may already be installed (tests, embedding); keep that one.
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }
}
