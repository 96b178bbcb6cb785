use std::{
    collections::HashSet,
    error,
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug)]
pub enum Error {
    InvalidRuleText(String),
    InvalidUpdate(String),
    CyclicRules(Vec<usize>),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidRuleText(s) => write!(f, "Invalid rule text({}) for printer.", s),
            Error::InvalidUpdate(s) => write!(f, "Invalid update text({}) for printer.", s),
            Error::CyclicRules(pages) => write!(
                f,
                "Rules among pages({:?}) form a cycle, can't put them in order.",
                pages
            ),
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

pub type Update = Vec<usize>;

/// Page ordering rules, each `(before, after)`.
#[derive(Debug, Default, Clone)]
pub struct PrinterRules {
    rules: HashSet<(usize, usize)>,
}

impl PrinterRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn add_rule(&mut self, rule_text: &str) -> Result<(), Error> {
        self.rules.insert(parse_rule(rule_text)?);

        Ok(())
    }

    pub fn must_precede(&self, before: usize, after: usize) -> bool {
        self.rules.contains(&(before, after))
    }

    pub fn is_valid(&self, update: &[usize]) -> bool {
        update.iter().enumerate().all(|(ind, page)| {
            update[(ind + 1)..]
                .iter()
                .all(|later| !self.must_precede(*later, *page))
        })
    }

    /// Reorders `update` so every applicable rule holds, keeping the given
    /// order among pages no rule relates.
    pub fn correct(&self, update: &[usize]) -> Result<Update, Error> {
        let mut left = Vec::from(update);
        let mut corrected = Vec::with_capacity(update.len());
        while !left.is_empty() {
            let next_ind = left
                .iter()
                .position(|page| !left.iter().any(|other| self.must_precede(*other, *page)))
                .ok_or_else(|| Error::CyclicRules(left.clone()))?;
            corrected.push(left.remove(next_ind));
        }

        Ok(corrected)
    }
}

pub fn parse_rule(rule_text: &str) -> Result<(usize, usize), Error> {
    let invalid = || Error::InvalidRuleText(rule_text.to_string());
    let (left, right) = rule_text.split_once('|').ok_or_else(invalid)?;
    let left_n = left.trim().parse::<usize>().map_err(|_| invalid())?;
    let right_n = right.trim().parse::<usize>().map_err(|_| invalid())?;

    Ok((left_n, right_n))
}

pub fn parse_update(update_text: &str) -> Result<Update, Error> {
    update_text
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<usize>()
                .map_err(|_| Error::InvalidUpdate(update_text.to_string()))
        })
        .collect()
}

/// The page at index `ceil(len / 2) - 1`.
pub fn middle(pages: &[usize]) -> Option<usize> {
    pages
        .len()
        .div_ceil(2)
        .checked_sub(1)
        .and_then(|ind| pages.get(ind))
        .copied()
}

pub fn parse_printer_settings(text: &str) -> Result<(PrinterRules, Vec<Update>)> {
    let mut rules = PrinterRules::new();
    let mut lines = text.lines().enumerate();
    for (ind, line) in lines.by_ref() {
        if line.is_empty() {
            break;
        }

        rules
            .add_rule(line)
            .with_context(|| format!("Failed to add printer rule text at line {}.", ind + 1))?;
    }

    let mut updates = Vec::new();
    for (ind, line) in lines {
        if line.is_empty() {
            continue;
        }

        let update = parse_update(line)
            .with_context(|| format!("Failed to read update at line {}.", ind + 1))?;
        updates.push(update);
    }
    debug!(
        rule_n = rules.len(),
        update_n = updates.len(),
        "read printer settings"
    );

    Ok((rules, updates))
}

pub fn read_printer_settings<P: AsRef<Path>>(path: P) -> Result<(PrinterRules, Vec<Update>)> {
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read given file({}).", path.as_ref().display()))?;

    parse_printer_settings(&text)
}
