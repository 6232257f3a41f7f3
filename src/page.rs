//! Definitions and types related to logical pages of virtual memory.

use std::fmt::Display;

/// The number of low address bits that address a byte within a page.
pub const PAGE_OFFSET: u32 = 12;

/// The size of a logical page / physical frame, in bytes.
pub const PAGE_SIZE: usize = 1 << PAGE_OFFSET;

/// A unique identifier for a logical page of virtual memory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber {
    /// Inner representation subject to change...
    inner: u64,
}

impl PageNumber {
    /// Creates a new `PageNumber` from a `u64`.
    pub fn new(number: u64) -> Self {
        Self { inner: number }
    }

    /// Derives the page that a virtual address falls into.
    ///
    /// This shift is the only transformation ever applied to raw addresses, everything after this
    /// point operates purely on page numbers.
    pub fn from_address(address: u32) -> Self {
        Self::new(u64::from(address >> PAGE_OFFSET))
    }

    /// Returns the `PageNumber` as a `u64`.
    pub fn as_u64(self) -> u64 {
        self.inner
    }
}

impl Display for PageNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Page {}", self.inner)
    }
}

impl From<PageNumber> for u64 {
    fn from(value: PageNumber) -> Self {
        value.as_u64()
    }
}

/// The kind of memory access a trace event performs on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// A load, which leaves the page clean.
    Read,
    /// A store, which marks the page as modified.
    Write,
}

impl AccessKind {
    /// Returns `true` if this access dirties the page.
    pub fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}

impl TryFrom<char> for AccessKind {
    type Error = char;

    /// Parses the single-character trace encoding, handing back the character if it is neither
    /// `'R'` nor `'W'`.
    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'R' => Ok(Self::Read),
            'W' => Ok(Self::Write),
            other => Err(other),
        }
    }
}

impl Display for AccessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read => write!(f, "R"),
            Self::Write => write!(f, "W"),
        }
    }
}
