//! Textual operations driving either backend over `i64`.
//!
//! Grammar, one op per token, 0-based indices:
//! `sum:L:R`, `add:I:D`, `add:L:R:D`, `get:I`, `total`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::error::IndexError;
use crate::groups::NumAdditiveGroups;
use crate::index::{RangeAggregateIndex, RangeUpdate};
use crate::{FenwickTree, SegmentTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Sum(usize, usize),
    Add(usize, i64),
    AddRange(usize, usize, i64),
    Get(usize),
    Total,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("malformed op `{0}`")]
    Malformed(String),
    #[error("unknown backend `{0}`")]
    UnknownBackend(String),
    #[error("range add is not supported by the {0} backend")]
    Unsupported(BackendKind),
    #[error(transparent)]
    Index(#[from] IndexError),
}

impl FromStr for Op {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ScriptError::Malformed(s.to_owned());
        let mut parts = s.trim().split(':');
        let name = parts.next().ok_or_else(malformed)?;
        let args: Vec<&str> = parts.collect();

        let index = |k: usize| args[k].parse::<usize>().map_err(|_| malformed());
        let delta = |k: usize| args[k].parse::<i64>().map_err(|_| malformed());

        match (name, args.len()) {
            ("sum", 2) => Ok(Op::Sum(index(0)?, index(1)?)),
            ("add", 2) => Ok(Op::Add(index(0)?, delta(1)?)),
            ("add", 3) => Ok(Op::AddRange(index(0)?, index(1)?, delta(2)?)),
            ("get", 1) => Ok(Op::Get(index(0)?)),
            ("total", 0) => Ok(Op::Total),
            _ => Err(malformed()),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Op::Sum(l, r) => write!(f, "sum:{}:{}", l, r),
            Op::Add(i, d) => write!(f, "add:{}:{}", i, d),
            Op::AddRange(l, r, d) => write!(f, "add:{}:{}:{}", l, r, d),
            Op::Get(i) => write!(f, "get:{}", i),
            Op::Total => write!(f, "total"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Segment,
    Fenwick,
}

impl FromStr for BackendKind {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "segment" => Ok(BackendKind::Segment),
            "fenwick" => Ok(BackendKind::Fenwick),
            _ => Err(ScriptError::UnknownBackend(s.to_owned())),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Segment => write!(f, "segment"),
            BackendKind::Fenwick => write!(f, "fenwick"),
        }
    }
}

pub enum Backend {
    Segment(SegmentTree<NumAdditiveGroups<i64>>),
    Fenwick(FenwickTree<NumAdditiveGroups<i64>>),
}

impl Backend {
    pub fn new(kind: BackendKind, values: Vec<i64>) -> Self {
        let group = NumAdditiveGroups::new();
        match kind {
            BackendKind::Segment => Backend::Segment(SegmentTree::from_values(group, values)),
            BackendKind::Fenwick => Backend::Fenwick(FenwickTree::from_values(group, values)),
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Segment(_) => BackendKind::Segment,
            Backend::Fenwick(_) => BackendKind::Fenwick,
        }
    }

    fn index(&mut self) -> &mut dyn RangeAggregateIndex<Elem = i64> {
        match self {
            Backend::Segment(st) => st,
            Backend::Fenwick(ft) => ft,
        }
    }

    /// Runs `op`. Reads yield `Some(value)`, updates yield `None`.
    pub fn apply(&mut self, op: Op) -> Result<Option<i64>, ScriptError> {
        log::trace!("{} backend: {}", self.kind(), op);
        match op {
            Op::Sum(l, r) => Ok(Some(self.index().sum(l, r)?)),
            Op::Get(i) => Ok(Some(self.index().sum(i, i)?)),
            Op::Total => Ok(Some(self.index().total())),
            Op::Add(i, d) => {
                self.index().add(i, d)?;
                Ok(None)
            }
            Op::AddRange(l, r, d) => match self {
                Backend::Segment(st) => {
                    st.add_range(l, r, d)?;
                    Ok(None)
                }
                Backend::Fenwick(_) => Err(ScriptError::Unsupported(BackendKind::Fenwick)),
            },
        }
    }
}
