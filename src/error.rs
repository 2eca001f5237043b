use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("index {index} is out of range for an index of length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("range is inverted: left {left} > right {right}")]
    InvertedRange { left: usize, right: usize },
    #[error("expected {expected} values, found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, IndexError>;

/// Validates the inclusive range `[l, r]` against the domain `lo..end`.
pub(crate) fn check_range(l: usize, r: usize, lo: usize, end: usize, len: usize) -> Result<()> {
    check_index(l, lo, end, len)?;
    check_index(r, lo, end, len)?;
    if l > r {
        return Err(IndexError::InvertedRange { left: l, right: r });
    }
    Ok(())
}

#[inline]
pub(crate) fn check_index(index: usize, lo: usize, end: usize, len: usize) -> Result<()> {
    if lo <= index && index < end {
        Ok(())
    } else {
        Err(IndexError::OutOfRange { index, len })
    }
}
