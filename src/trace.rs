//! Reading branch records from a text trace.
//!
//! Each line describes one retired control-flow instruction:
//!
//! ```text
//! <pc> <target> <outcome> <conditional> <call> <return> <direct>
//! ```
//!
//! `pc` and `target` are hexadecimal (an `0x` prefix is optional) and the
//! remaining fields are `0` or `1`. The short form `<pc> <outcome>` describes
//! a direct conditional branch. Blank lines and lines starting with `#` are
//! ignored.

use std::io::BufRead;

use crate::Outcome;
use crate::branch::*;
use crate::error::TraceError;

const FIELDS: [&str; 7] = [
    "pc", "target", "outcome", "conditional", "call", "return", "direct",
];

fn parse_hex(line: usize, field: &'static str, s: &str)
    -> Result<u32, TraceError>
{
    let digits = s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u32::from_str_radix(digits, 16).map_err(|_| TraceError::InvalidField {
        line, field, value: s.to_string()
    })
}

fn parse_bit(line: usize, field: &'static str, s: &str)
    -> Result<Outcome, TraceError>
{
    s.parse::<u32>().ok()
        .and_then(Outcome::from_bit)
        .ok_or_else(|| TraceError::InvalidField {
            line, field, value: s.to_string()
        })
}

fn parse_flag(line: usize, field: &'static str, s: &str)
    -> Result<bool, TraceError>
{
    parse_bit(line, field, s).map(bool::from)
}

/// Parse a single trace line. Returns `Ok(None)` for blank and comment
/// lines. `line` is only used for error reporting.
pub fn parse_line(line: usize, s: &str) -> Result<Option<BranchRecord>, TraceError> {
    let s = s.trim();
    if s.is_empty() || s.starts_with('#') {
        return Ok(None);
    }
    let tok: Vec<&str> = s.split_whitespace().collect();

    if tok.len() == 2 {
        let pc = parse_hex(line, "pc", tok[0])?;
        let outcome = parse_bit(line, "outcome", tok[1])?;
        return Ok(Some(BranchRecord::conditional(pc, 0, outcome)));
    }

    if tok.len() < FIELDS.len() {
        return Err(TraceError::MissingField { line, field: FIELDS[tok.len()] });
    }

    let pc = parse_hex(line, "pc", tok[0])?;
    let tgt = parse_hex(line, "target", tok[1])?;
    let outcome = parse_bit(line, "outcome", tok[2])?;
    let conditional = parse_flag(line, "conditional", tok[3])?;
    let call = parse_flag(line, "call", tok[4])?;
    let ret = parse_flag(line, "return", tok[5])?;
    let direct = parse_flag(line, "direct", tok[6])?;

    Ok(Some(BranchRecord {
        pc,
        tgt,
        outcome,
        flags: BranchFlags::new(conditional, call, ret, direct),
    }))
}

/// An iterator over the records in a text trace.
pub struct TraceReader<R: BufRead> {
    inner: std::io::Lines<R>,
    line: usize,
}
impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self { inner: reader.lines(), line: 0 }
    }

    /// Number of lines consumed so far.
    pub fn line(&self) -> usize { self.line }
}
impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<BranchRecord, TraceError>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let s = match self.inner.next()? {
                Ok(s) => s,
                Err(e) => return Some(Err(e.into())),
            };
            self.line += 1;
            match parse_line(self.line, &s) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
