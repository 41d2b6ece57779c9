//! File configuration, loaded from `Stackbot.toml`.

use std::fs;
use std::io;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};
use stackbot_core::{BoardConfig, Game, SevenBag};
use stackbot_eval::EvalWeights;
use stackbot_search::{SelectorError, TwoPlySelector};
use thiserror::Error;

pub const DEFAULT_PATH: &str = "Stackbot.toml";

/// Smallest board a spawned piece fits on.
const MIN_WIDTH: usize = 6;
const MIN_TOTAL_HEIGHT: usize = 5;
/// Piece coordinates are `i8` and reach up to five cells past the board.
const MAX_SIDE: usize = i8::MAX as usize - 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("board {width}x{height} is outside the supported size range")]
    Board { width: usize, height: usize },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board: BoardConfig,
    pub weights: EvalWeights,
    pub ai: AiConfig,
    pub autoplay: AutoplayConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Workers scoring candidates; 0 uses rayon's global pool.
    pub threads: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    /// Pieces to play before stopping.
    pub pieces: usize,
    /// Bag seed; OS entropy when absent.
    pub seed: Option<u64>,
    /// Log the board after every piece.
    pub show_board: bool,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            pieces: 200,
            seed: None,
            show_board: false,
        }
    }
}

impl Config {
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::parse(&contents)
    }

    /// Reads `Stackbot.toml` from the working directory.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_file(DEFAULT_PATH)
    }

    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            warn!("could not load {} ({}), using defaults", DEFAULT_PATH, e);
            Self::default()
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let board = &self.board;
        let width = MIN_WIDTH..=MAX_SIDE;
        let height = MIN_TOTAL_HEIGHT..=MAX_SIDE;
        if !width.contains(&board.width) || !height.contains(&board.total_height()) {
            return Err(ConfigError::Board {
                width: board.width,
                height: board.total_height(),
            });
        }
        Ok(())
    }

    pub fn selector(&self) -> Result<TwoPlySelector, SelectorError> {
        TwoPlySelector::with_threads(self.weights.clone(), self.ai.threads)
    }

    /// A fresh game on the configured board, seeded if a seed is set.
    pub fn new_game(&self) -> Game {
        let bag = match self.autoplay.seed {
            Some(seed) => SevenBag::seeded(seed),
            None => SevenBag::from_entropy(),
        };
        Game::new(&self.board, bag)
    }
}
