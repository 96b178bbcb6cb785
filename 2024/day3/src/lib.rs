use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

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

static MUL_INST_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"mul\((\d{1,3}),(\d{1,3})\)").unwrap());
static COND_INST_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"mul\((\d{1,3}),(\d{1,3})\)|do\(\)|don't\(\)").unwrap());

/// Corrupted program memory, scanned for the instructions still intact.
#[derive(Debug, Clone)]
pub struct Memory {
    text: String,
}

impl Memory {
    pub fn new(s: &str) -> Self {
        Self {
            text: s.to_string(),
        }
    }

    pub fn mul_pairs(&self) -> Vec<(usize, usize)> {
        MUL_INST_PATTERN
            .captures_iter(&self.text)
            .filter_map(|caps| factors(&caps))
            .collect()
    }

    /// Like `mul_pairs`, but skips multiplications between a `don't()` and
    /// the next `do()`. Multiplications start enabled.
    pub fn enabled_mul_pairs(&self) -> Vec<(usize, usize)> {
        let mut is_enabled = true;
        let mut pairs = Vec::new();
        for caps in COND_INST_PATTERN.captures_iter(&self.text) {
            match &caps[0] {
                "do()" => is_enabled = true,
                "don't()" => is_enabled = false,
                _ if is_enabled => pairs.extend(factors(&caps)),
                _ => (),
            }
        }

        pairs
    }
}

fn factors(caps: &Captures) -> Option<(usize, usize)> {
    let l_factor = caps.get(1)?.as_str().parse::<usize>().ok()?;
    let r_factor = caps.get(2)?.as_str().parse::<usize>().ok()?;
    Some((l_factor, r_factor))
}

pub fn multiply(pairs: &[(usize, usize)]) -> usize {
    pairs.iter().map(|(l, r)| l * r).sum()
}

pub fn read_memory<P: AsRef<Path>>(path: P) -> Result<Memory> {
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read given file({}).", path.as_ref().display()))?;
    debug!(len = text.len(), "read corrupted memory");

    Ok(Memory::new(&text))
}
