use std::{
    collections::HashMap,
    error,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug)]
pub enum Error {
    InvalidChar(char),
    MissingId(String),
    ExtraId(String),
    InvalidId(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidChar(c) => write!(f, "Invalid character({}) in location ID list.", c),
            Error::MissingId(s) => write!(
                f,
                "Given string({}) has less than two location IDs, expect one for each list.",
                s
            ),
            Error::ExtraId(s) => write!(
                f,
                "Given string({}) has more than two location IDs, expect one for each list.",
                s
            ),
            Error::InvalidId(s) => write!(f, "Location ID({}) is too large.", s),
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

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocationLists {
    left: Vec<usize>,
    right: Vec<usize>,
}

impl FromStr for LocationLists {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut lists = Self::default();
        for line in s.lines() {
            lists.add_pair(line)?;
        }

        Ok(lists)
    }
}

impl LocationLists {
    pub fn new(left: Vec<usize>, right: Vec<usize>) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> &[usize] {
        &self.left
    }

    pub fn right(&self) -> &[usize] {
        &self.right
    }

    pub fn add_pair(&mut self, line: &str) -> Result<(), Error> {
        let mut ids = line.split_ascii_whitespace().map(read_id);
        let (id0, id1) = match (ids.next(), ids.next()) {
            (Some(id0), Some(id1)) => (id0?, id1?),
            _ => return Err(Error::MissingId(line.to_string())),
        };
        if ids.next().is_some() {
            return Err(Error::ExtraId(line.to_string()));
        }

        self.left.push(id0);
        self.right.push(id1);

        Ok(())
    }

    /// Pairs both lists up by rank and sums the distances of the pairs.
    pub fn total_distance(&self) -> usize {
        let mut left = self.left.clone();
        let mut right = self.right.clone();
        left.sort_unstable();
        right.sort_unstable();

        left.iter()
            .zip(right.iter())
            .map(|(id0, id1)| id0.abs_diff(*id1))
            .sum()
    }

    pub fn similarity_score(&self) -> usize {
        let right_counts = counts(&self.right);
        self.left
            .iter()
            .map(|id| id * right_counts.get(id).copied().unwrap_or(0))
            .sum()
    }
}

pub fn counts(ids: &[usize]) -> HashMap<usize, usize> {
    let mut counts = HashMap::new();
    for id in ids {
        *counts.entry(*id).or_insert(0) += 1;
    }

    counts
}

fn read_id(s: &str) -> Result<usize, Error> {
    s.chars().try_fold(0usize, |n, c| {
        let digit = c.to_digit(10).ok_or(Error::InvalidChar(c))?;
        n.checked_mul(10)
            .and_then(|n| n.checked_add(digit as usize))
            .ok_or_else(|| Error::InvalidId(s.to_string()))
    })
}

pub fn read_lists<P: AsRef<Path>>(path: P) -> Result<LocationLists> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({})", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut lists = LocationLists::default();
    for (ind, line) in reader.lines().enumerate() {
        let s = line.with_context(|| {
            format!(
                "Failed to read line #{} of given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
        lists
            .add_pair(&s)
            .with_context(|| format!("Failed to read location IDs in string({}).", s))?;
    }
    debug!(pair_n = lists.left.len(), "read location ID lists");

    Ok(lists)
}
