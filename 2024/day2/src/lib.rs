use std::{
    error,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const MAX_GAP: usize = 3;

#[derive(Debug)]
pub enum Error {
    InvalidChar(char),
    LevelOverflow(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidChar(c) => {
                write!(f, "Invalid character {} found in given level list.", c)
            }
            Error::LevelOverflow(s) => write!(f, "Level in given list({}) is too large.", s),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    levels: Vec<usize>,
}

impl TryFrom<&str> for Report {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let mut levels = Vec::new();
        let mut cur_level = None;
        for c in value.chars() {
            if c.is_ascii_whitespace() {
                if let Some(level) = cur_level.take() {
                    levels.push(level);
                }

                continue;
            }

            let digit = c.to_digit(10).ok_or(Error::InvalidChar(c))?;
            let level = cur_level
                .unwrap_or(0usize)
                .checked_mul(10)
                .and_then(|n| n.checked_add(digit as usize))
                .ok_or_else(|| Error::LevelOverflow(value.to_string()))?;
            cur_level = Some(level);
        }

        if let Some(level) = cur_level.take() {
            levels.push(level);
        }

        Ok(Self { levels })
    }
}

impl Report {
    pub fn new(levels: Vec<usize>) -> Self {
        Self { levels }
    }

    pub fn levels(&self) -> &[usize] {
        &self.levels
    }

    pub fn gaps(&self) -> Vec<isize> {
        self.levels
            .windows(2)
            .map(|pair| pair[1] as isize - pair[0] as isize)
            .collect()
    }

    /// Safe when levels strictly increase or strictly decrease, by at most 3 each time.
    pub fn is_safe(&self) -> bool {
        let gaps = self.gaps();
        let is_small = gaps.iter().all(|gap| gap.unsigned_abs() <= MAX_GAP);
        let is_inc = gaps.iter().all(|gap| *gap > 0);
        let is_dec = gaps.iter().all(|gap| *gap < 0);

        is_small && (is_inc || is_dec)
    }

    /// Copies of this report, each with a different level removed.
    pub fn dampened(&self) -> Vec<Report> {
        (0..self.levels.len())
            .map(|ind| {
                let mut levels = self.levels.clone();
                levels.remove(ind);
                Report::new(levels)
            })
            .collect()
    }

    pub fn is_tolerantly_safe(&self) -> bool {
        self.is_safe() || self.dampened().iter().any(Report::is_safe)
    }
}

pub fn read_reps<P: AsRef<Path>>(path: P) -> Result<Vec<Report>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);

    let reports = reader
        .lines()
        .enumerate()
        .map(|(ind, l)| {
            l.with_context(|| {
                format!(
                    "Failed to read line {} from given file({})",
                    ind + 1,
                    path.as_ref().display()
                )
            })
            .and_then(|s| {
                Report::try_from(s.as_str())
                    .with_context(|| format!("Failed to read levels from given string({}).", s))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(report_n = reports.len(), "read reports");

    Ok(reports)
}
