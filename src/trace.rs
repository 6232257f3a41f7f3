//! Reading memory access traces.
//!
//! A trace is a text file of access events, one per line. Each event is a hexadecimal virtual
//! address followed by the access kind, `R` or `W`:
//!
//! ```text
//! 0041f7a0 R
//! 13f5e2c0 R
//! 05e78900 W
//! ```

use crate::error::{Error, Result};
use crate::page::{AccessKind, PageNumber};
use std::io::{BufRead, Split};

/// A single access event read from a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
    /// The virtual address that was accessed.
    pub address: u32,

    /// Whether the address was read or written.
    pub access: AccessKind,
}

impl TraceEntry {
    /// Creates a new `TraceEntry`.
    pub fn new(address: u32, access: AccessKind) -> Self {
        Self { address, access }
    }

    /// Returns the page the accessed address falls into.
    pub fn page(&self) -> PageNumber {
        PageNumber::from_address(self.address)
    }
}

/// An iterator over the [`TraceEntry`]s of a trace, parsed lazily from a buffered reader.
///
/// Blank lines are skipped. The iterator yields an error for the first malformed entry and for any
/// I/O error, and it is up to the caller to stop there.
#[derive(Debug)]
pub struct TraceReader<R> {
    /// The remaining raw lines of the trace, decoded one at a time so that bad bytes are reported
    /// against their line.
    lines: Split<R>,

    /// The number of lines consumed so far.
    line: usize,

    /// The number of events yielded so far.
    event: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Creates a new `TraceReader` over the trace in `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.split(b'\n'),
            line: 0,
            event: 0,
        }
    }

    /// Builds the error for the entry currently being parsed.
    fn malformed(&self, reason: impl Into<String>) -> Error {
        Error::MalformedTraceEntry {
            event: self.event,
            line: self.line,
            reason: reason.into(),
        }
    }

    /// Parses one non-blank line of the trace.
    fn parse(&self, text: &str) -> Result<TraceEntry> {
        let mut fields = text.split_whitespace();

        let (Some(address), Some(access)) = (fields.next(), fields.next()) else {
            return Err(self.malformed("expected an address and an access kind"));
        };

        if let Some(extra) = fields.next() {
            return Err(self.malformed(format!("unexpected trailing field `{extra}`")));
        }

        let digits = address
            .strip_prefix("0x")
            .or_else(|| address.strip_prefix("0X"))
            .unwrap_or(address);
        let address = u32::from_str_radix(digits, 16)
            .map_err(|e| self.malformed(format!("invalid address `{address}`: {e}")))?;

        let mut chars = access.chars();
        let access = match (chars.next(), chars.next()) {
            (Some(c), None) => AccessKind::try_from(c)
                .map_err(|c| self.malformed(format!("access kind must be R or W, got `{c}`")))?,
            _ => {
                return Err(self.malformed(format!(
                    "access kind must be R or W, got `{access}`"
                )))
            }
        };

        Ok(TraceEntry::new(address, access))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let bytes = match self.lines.next()? {
                Ok(bytes) => bytes,
                Err(e) => return Some(Err(e.into())),
            };
            self.line += 1;

            let text = match std::str::from_utf8(&bytes) {
                Ok(text) => text,
                Err(e) => {
                    self.event += 1;
                    return Some(Err(self.malformed(format!("entry is not valid UTF-8: {e}"))));
                }
            };

            if text.trim().is_empty() {
                continue;
            }

            self.event += 1;
            return Some(self.parse(text));
        }
    }
}
