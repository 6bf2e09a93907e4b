//! Runtime configuration for the terminal binary.
//!
//! Values come from `MEMORY_*` environment variables first; command-line flags
//! then override them.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use log::LevelFilter;

use crate::core::SessionConfig;
use crate::types::Difficulty;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub rows: Option<u16>,
    pub columns: Option<u16>,
    pub moves: Option<u32>,
    pub seed: Option<u64>,
    pub faces: Option<u32>,
    pub preview_ms: Option<u32>,
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            rows: None,
            columns: None,
            moves: None,
            seed: None,
            faces: None,
            preview_ms: None,
            log_path: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut config = Self::default();
        if let Some(v) = var("MEMORY_DIFFICULTY") {
            config.difficulty = parse_difficulty(&v).context("MEMORY_DIFFICULTY")?;
        }
        config.rows = var("MEMORY_ROWS")
            .map(|v| parse_num(&v).context("MEMORY_ROWS"))
            .transpose()?;
        config.columns = var("MEMORY_COLUMNS")
            .map(|v| parse_num(&v).context("MEMORY_COLUMNS"))
            .transpose()?;
        config.moves = var("MEMORY_MOVES")
            .map(|v| parse_num(&v).context("MEMORY_MOVES"))
            .transpose()?;
        config.seed = var("MEMORY_SEED")
            .map(|v| parse_num(&v).context("MEMORY_SEED"))
            .transpose()?;
        config.faces = var("MEMORY_FACES")
            .map(|v| parse_num(&v).context("MEMORY_FACES"))
            .transpose()?;
        config.preview_ms = var("MEMORY_PREVIEW_MS")
            .map(|v| parse_num(&v).context("MEMORY_PREVIEW_MS"))
            .transpose()?;
        config.log_path = var("MEMORY_LOG_PATH").map(PathBuf::from);
        if let Some(v) = var("MEMORY_LOG_LEVEL") {
            config.log_level = parse_level(&v).context("MEMORY_LOG_LEVEL")?;
        }
        Ok(config)
    }

    /// Apply command-line flags (program name excluded) on top of `self`.
    pub fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 0usize;
        while i < args.len() {
            let flag = args[i].as_str();
            let value = || {
                args.get(i + 1)
                    .map(String::as_str)
                    .ok_or_else(|| anyhow!("missing value for {}", flag))
            };
            match flag {
                "--difficulty" => self.difficulty = parse_difficulty(value()?)?,
                "--rows" => self.rows = Some(parse_num(value()?).context("--rows")?),
                "--columns" => self.columns = Some(parse_num(value()?).context("--columns")?),
                "--moves" => self.moves = Some(parse_num(value()?).context("--moves")?),
                "--seed" => self.seed = Some(parse_num(value()?).context("--seed")?),
                "--faces" => self.faces = Some(parse_num(value()?).context("--faces")?),
                "--preview-ms" => {
                    self.preview_ms = Some(parse_num(value()?).context("--preview-ms")?)
                }
                "--log" => self.log_path = Some(PathBuf::from(value()?)),
                other => return Err(anyhow!("unknown argument: {}", other)),
            }
            i += 2;
        }
        Ok(())
    }

    /// Environment first, then `std::env::args`.
    pub fn load() -> Result<Self> {
        let mut config = Self::from_env()?;
        let args: Vec<String> = std::env::args().skip(1).collect();
        config.apply_args(&args)?;
        Ok(config)
    }

    /// The difficulty preset with any explicit overrides applied.
    pub fn session_config(&self) -> SessionConfig {
        let mut session = SessionConfig::for_difficulty(self.difficulty);
        let (rows, columns) = (
            self.rows.unwrap_or(session.rows),
            self.columns.unwrap_or(session.columns),
        );
        session = session.with_grid(rows, columns);
        if let Some(moves) = self.moves {
            session = session.with_moves(moves);
        }
        if let Some(faces) = self.faces {
            session = session.with_face_pool(faces);
        }
        if let Some(preview_ms) = self.preview_ms {
            session = session.with_preview_ms(preview_ms);
        }
        if let Some(seed) = self.seed {
            session = session.with_seed(seed);
        }
        session
    }
}

fn parse_difficulty(value: &str) -> Result<Difficulty> {
    Difficulty::from_str(value).ok_or_else(|| anyhow!("invalid difficulty: {}", value))
}

fn parse_num<T: FromStr>(value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| anyhow!("invalid number: {}", value))
}

fn parse_level(value: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(value).map_err(|_| anyhow!("invalid log level: {}", value))
}
