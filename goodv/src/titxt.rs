// goodv-rs/goodv/src/titxt.rs

//! TI-TXT interchange codec, the MSP430 hex-block dump/load format.
//!
//! The format is rather poorly defined upstream, but in general each line
//! is either an address preceded by `@`, a line of up to 16 data bytes in
//! hex, or the letter `q`, which ends the document. Parsing can simply
//! forget about line breaks and treat each whitespace-separated word as a
//! token. An `x` terminator additionally asks for execution at the
//! current address.
//!
//! Parsing is separated from applying: [`parse`] validates the whole
//! document into [`Op`]s before a single byte is written, so a malformed
//! document has no side effects.

use crate::{Error, Result};
use std::fmt::Write as _;

/// One semantic instruction of a TI-TXT document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Write a contiguous byte run at an address.
    Write { adr: u16, data: Vec<u8> },
    /// Execute at an address.
    Exec { adr: u16 },
}

/// Render one contiguous region as TI-TXT: an address marker followed by
/// the bytes, 16 per row. Row breaks are cosmetic only.
pub fn render(adr: u16, data: &[u8]) -> String {
    let mut dump = String::with_capacity(8 + data.len() * 3);
    let _ = write!(dump, "@{:04x}", adr);

    for (i, b) in data.iter().enumerate() {
        if i % 16 == 0 {
            let _ = write!(dump, "\n{:02x}", b);
        } else {
            let _ = write!(dump, " {:02x}", b);
        }
    }

    dump
}

fn is_data_token(word: &str) -> bool {
    word.len() == 2 && word.bytes().all(|b| b.is_ascii_hexdigit())
}

fn parse_address(word: &str) -> Result<u16> {
    let digits = &word[1..];
    if digits.is_empty() || digits.len() > 4 {
        return Err(Error::TitxtFormat(format!("bad address token '{}'", word)));
    }
    u16::from_str_radix(digits, 16)
        .map_err(|_| Error::TitxtFormat(format!("bad address token '{}'", word)))
}

/// Parse a TI-TXT document into its instruction sequence.
///
/// Data bytes accumulate into a pending run; every non-data token flushes
/// the run as one write before it is interpreted itself. `q` ends the
/// document, `x` ends it after requesting execution at the current
/// address. Reaching the end of input without a terminator is a format
/// error, and nothing of a malformed document is committed.
pub fn parse(txt: &str) -> Result<Vec<Op>> {
    let mut ops = Vec::new();
    let mut adr: u16 = 0;
    let mut run: Vec<u8> = Vec::new();

    let flush = |ops: &mut Vec<Op>, run: &mut Vec<u8>, adr: u16| {
        if !run.is_empty() {
            ops.push(Op::Write {
                adr,
                data: std::mem::take(run),
            });
        }
    };

    for word in txt.split_whitespace() {
        if is_data_token(word) {
            // from_str_radix cannot fail here; the token is two hex digits.
            run.push(u8::from_str_radix(word, 16).unwrap_or_default());
        } else if word.eq_ignore_ascii_case("q") {
            flush(&mut ops, &mut run, adr);
            return Ok(ops);
        } else if word.eq_ignore_ascii_case("x") {
            flush(&mut ops, &mut run, adr);
            ops.push(Op::Exec { adr });
            return Ok(ops);
        } else if word.starts_with('@') {
            flush(&mut ops, &mut run, adr);
            adr = parse_address(word)?;
        } else {
            return Err(Error::TitxtFormat(format!("unexpected token '{}'", word)));
        }
    }

    log::error!("TI-TXT file doesn't end with q.");
    Err(Error::TitxtFormat("missing terminator".to_string()))
}
