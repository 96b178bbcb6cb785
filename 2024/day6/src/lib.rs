use std::{
    collections::HashSet,
    error,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, trace};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug)]
pub enum Error {
    InconsistentRow(usize, usize, usize),
    MultipleGuards(Guard, Guard),
    InvalidChar(char, Position),
    NoGuard,
    EndlessPatrol(Guard),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InconsistentRow(row_ind, expect_col_n, real_col_n) => write!(
                f,
                "Expect {} columns in row {}, given {}.",
                expect_col_n, row_ind, real_col_n
            ),
            Error::MultipleGuards(guard0, guard1) => write!(
                f,
                "Found multiple guards({}, {}) in given laboratory, expect one only.",
                guard0, guard1
            ),
            Error::InvalidChar(c, pos) => write!(
                f,
                "Invalid character({}) at {} in text of laboratory layout.",
                c, pos
            ),
            Error::NoGuard => write!(f, "There's no guard in given laboratory, but expect one."),
            Error::EndlessPatrol(guard) => write!(
                f,
                "The guard starting from {} patrols in a loop and never leaves the laboratory.",
                guard
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
}

/// Installs a compact stderr subscriber filtered by `RUST_LOG`, `warn` when unset.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

/// Facing of the guard, rotating clockwise in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Display for Heading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Heading::North => write!(f, "^"),
            Heading::East => write!(f, ">"),
            Heading::South => write!(f, "v"),
            Heading::West => write!(f, "<"),
        }
    }
}

impl Heading {
    pub fn turn_right(self) -> Self {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }
}

/// Cell coordinate, signed so a guard who has walked off the map still has a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    row: isize,
    col: isize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Position {
    pub fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> isize {
        self.row
    }

    pub fn col(&self) -> isize {
        self.col
    }

    pub fn along(&self, heading: Heading) -> Position {
        match heading {
            Heading::North => Self::new(self.row - 1, self.col),
            Heading::East => Self::new(self.row, self.col + 1),
            Heading::South => Self::new(self.row + 1, self.col),
            Heading::West => Self::new(self.row, self.col - 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Guard {
    pos: Position,
    heading: Heading,
}

impl Display for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.heading, self.pos)
    }
}

impl Guard {
    pub fn new(pos: Position, heading: Heading) -> Self {
        Self { pos, heading }
    }

    pub fn pos(&self) -> &Position {
        &self.pos
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn ahead_pos(&self) -> Position {
        self.pos.along(self.heading)
    }

    pub fn go_ahead(&mut self) {
        self.pos = self.ahead_pos();
    }

    pub fn turn_right(&mut self) {
        self.heading = self.heading.turn_right();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Turned,
    Moved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patrol {
    /// The guard left the map; holds every distinct cell stood on before leaving.
    Exited(HashSet<Position>),
    /// The guard came back to a position and heading already seen.
    Looped,
}

impl Patrol {
    pub fn is_loop(&self) -> bool {
        matches!(self, Patrol::Looped)
    }

    pub fn visited(&self) -> Option<&HashSet<Position>> {
        match self {
            Patrol::Exited(visited) => Some(visited),
            Patrol::Looped => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Laboratory {
    tiles: Vec<bool>, // Is blocked?
    row_n: usize,
    col_n: usize,
    guard: Guard,
}

impl FromStr for Laboratory {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut builder = LaboratoryBuilder::new();
        for line in s.lines() {
            builder.add_row(line)?;
        }

        builder.build()
    }
}

impl Laboratory {
    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    pub fn row_n(&self) -> usize {
        self.row_n
    }

    pub fn col_n(&self) -> usize {
        self.col_n
    }

    pub fn is_inside(&self, pos: &Position) -> bool {
        self.tile_ind(pos).is_some()
    }

    /// Cells outside the map are never blocked.
    pub fn is_blocked(&self, pos: &Position) -> bool {
        self.tile_ind(pos)
            .and_then(|ind| self.tiles.get(ind))
            .is_some_and(|is_blocked| *is_blocked)
    }

    /// Advances `guard` by one step: a turn in place if the cell ahead is
    /// blocked, a move forward (possibly off the map) otherwise.
    pub fn step(&self, guard: &mut Guard) -> Step {
        self.step_with(guard, None)
    }

    pub fn patrol(&self) -> Patrol {
        self.patrol_with(None)
    }

    /// Walks as if `obstacle` were also blocked, leaving the map untouched.
    pub fn patrol_with_obstacle(&self, obstacle: &Position) -> Patrol {
        self.patrol_with(Some(obstacle))
    }

    pub fn patrol_len(&self) -> Result<usize, Error> {
        self.patrol()
            .visited()
            .map(|visited| visited.len())
            .ok_or(Error::EndlessPatrol(self.guard))
    }

    pub fn loop_obstructions(&self) -> Result<HashSet<Position>, Error> {
        let patrol = self.patrol();
        let visited = patrol.visited().ok_or(Error::EndlessPatrol(self.guard))?;

        // Only cells on the original route can change it; the start is occupied.
        let obstructions = visited
            .iter()
            .filter(|pos| **pos != self.guard.pos)
            .filter(|pos| self.patrol_with_obstacle(pos).is_loop())
            .copied()
            .collect::<HashSet<_>>();
        debug!(
            candidate_n = visited.len() - 1,
            obstruction_n = obstructions.len(),
            "searched loop obstructions"
        );

        Ok(obstructions)
    }

    fn step_with(&self, guard: &mut Guard, obstacle: Option<&Position>) -> Step {
        let ahead_pos = guard.ahead_pos();
        let is_obstacle = obstacle.is_some_and(|pos| *pos == ahead_pos && self.is_inside(pos));
        if is_obstacle || self.is_blocked(&ahead_pos) {
            guard.turn_right();
            Step::Turned
        } else {
            guard.go_ahead();
            Step::Moved
        }
    }

    fn patrol_with(&self, obstacle: Option<&Position>) -> Patrol {
        let mut cur_guard = self.guard;
        let mut visited = HashSet::new();
        let mut seen_guards = HashSet::new();
        while self.is_inside(cur_guard.pos()) {
            visited.insert(cur_guard.pos);
            if !seen_guards.insert(cur_guard) {
                trace!(guard = %cur_guard, "guard repeats an earlier state");
                return Patrol::Looped;
            }

            if self.step_with(&mut cur_guard, obstacle) == Step::Turned {
                trace!(guard = %cur_guard, "guard turned right");
            }
        }

        trace!(
            exit = %cur_guard,
            visited_n = visited.len(),
            "guard left the laboratory"
        );
        Patrol::Exited(visited)
    }

    fn tile_ind(&self, pos: &Position) -> Option<usize> {
        let row = usize::try_from(pos.row).ok()?;
        let col = usize::try_from(pos.col).ok()?;
        if row >= self.row_n || col >= self.col_n {
            None
        } else {
            Some(row * self.col_n + col)
        }
    }
}

struct LaboratoryBuilder {
    tiles: Vec<bool>,
    row_n: usize,
    col_n: Option<usize>,
    guard: Option<Guard>,
}

impl LaboratoryBuilder {
    pub fn new() -> Self {
        Self {
            tiles: Vec::new(),
            row_n: 0,
            col_n: None,
            guard: None,
        }
    }

    pub fn add_row(&mut self, row_text: &str) -> Result<(), Error> {
        let this_col_n = row_text.chars().count();
        let expect_col_n = *self.col_n.get_or_insert(this_col_n);
        if expect_col_n != this_col_n {
            return Err(Error::InconsistentRow(self.row_n, expect_col_n, this_col_n));
        }

        for (ind, c) in row_text.chars().enumerate() {
            let pos = Position::new(self.row_n as isize, ind as isize);
            match c {
                '.' => self.tiles.push(false),
                '#' => self.tiles.push(true),
                '^' => {
                    let guard = Guard::new(pos, Heading::North);
                    if let Some(first_guard) = self.guard {
                        return Err(Error::MultipleGuards(first_guard, guard));
                    }

                    self.guard = Some(guard);
                    self.tiles.push(false);
                }
                other => return Err(Error::InvalidChar(other, pos)),
            }
        }
        self.row_n += 1;

        Ok(())
    }

    pub fn build(self) -> Result<Laboratory, Error> {
        let guard = self.guard.ok_or(Error::NoGuard)?;
        debug!(
            row_n = self.row_n,
            col_n = self.col_n.unwrap_or(0),
            guard = %guard,
            "built laboratory"
        );

        Ok(Laboratory {
            tiles: self.tiles,
            row_n: self.row_n,
            col_n: self.col_n.unwrap_or(0),
            guard,
        })
    }
}

pub fn read_lab<P: AsRef<Path>>(path: P) -> Result<Laboratory> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut builder = LaboratoryBuilder::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!(
                "Failed to read line {} from given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
        builder.add_row(line.as_str())?;
    }

    Ok(builder.build()?)
}
