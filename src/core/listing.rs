//! Text form of the record list, i.e. what the outer blob encrypts
//!
//! A list of 2-tuples of bytes literals, exactly as a Python `repr` prints
//! it: `[(b'\x8f..', b'..'), (b'..', b'..')]`. Each literal holds one
//! still-encrypted field, so the listing carries ciphertext only.

use thiserror::Error;

use crate::core::record::Record;

const HEX: &[u8; 16] = b"0123456789abcdef";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListingError {
    #[error("unexpected end of listing")]
    UnexpectedEnd,

    #[error("expected {expected} at offset {offset}")]
    Expected {
        expected: &'static str,
        offset: usize,
    },

    #[error("invalid escape at offset {0}")]
    InvalidEscape(usize),

    #[error("non-ASCII character in bytes literal at offset {0}")]
    NonAscii(usize),

    #[error("trailing data at offset {0}")]
    TrailingData(usize),
}

/// Render records as `[(b'..', b'..'), ...]`
pub fn render(records: &[Record]) -> String {
    let mut out = String::from("[");
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('(');
        write_bytes_literal(&mut out, record.key());
        out.push_str(", ");
        write_bytes_literal(&mut out, record.value());
        out.push(')');
    }
    out.push(']');
    out
}

/// Python-style `b'..'` literal for one byte string
pub fn bytes_literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 3);
    write_bytes_literal(&mut out, bytes);
    out
}

fn write_bytes_literal(out: &mut String, bytes: &[u8]) {
    // Double quotes only when that avoids escaping a single quote
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        b'"'
    } else {
        b'\''
    };

    out.push('b');
    out.push(char::from(quote));
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            _ if b == quote => {
                out.push('\\');
                out.push(char::from(b));
            }
            0x20..=0x7e => out.push(char::from(b)),
            _ => {
                out.push_str("\\x");
                out.push(char::from(HEX[usize::from(b >> 4)]));
                out.push(char::from(HEX[usize::from(b & 0x0f)]));
            }
        }
    }
    out.push(char::from(quote));
}

/// Parse a listing produced by [`render`] (or by Python's `repr`)
pub fn parse(text: &str) -> Result<Vec<Record>, ListingError> {
    Parser {
        src: text.as_bytes(),
        pos: 0,
    }
    .list()
}

struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) -> Result<u8, ListingError> {
        let b = self.peek().ok_or(ListingError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(b)
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), ListingError> {
        match self.peek() {
            None => Err(ListingError::UnexpectedEnd),
            Some(b) if b == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(ListingError::Expected {
                expected,
                offset: self.pos,
            }),
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn list(mut self) -> Result<Vec<Record>, ListingError> {
        self.skip_ws();
        self.expect(b'[', "'['")?;

        let mut records = Vec::new();
        loop {
            self.skip_ws();
            if self.eat(b']') {
                break;
            }
            records.push(self.pair()?);
            self.skip_ws();
            if self.eat(b',') {
                continue;
            }
            self.expect(b']', "',' or ']'")?;
            break;
        }

        self.skip_ws();
        if self.pos != self.src.len() {
            return Err(ListingError::TrailingData(self.pos));
        }
        Ok(records)
    }

    fn pair(&mut self) -> Result<Record, ListingError> {
        self.expect(b'(', "'('")?;
        self.skip_ws();
        let key = self.bytes_literal()?;
        self.skip_ws();
        self.expect(b',', "','")?;
        self.skip_ws();
        let value = self.bytes_literal()?;
        self.skip_ws();
        if self.eat(b',') {
            self.skip_ws();
        }
        self.expect(b')', "')'")?;
        Ok(Record::new(key, value))
    }

    fn bytes_literal(&mut self) -> Result<Vec<u8>, ListingError> {
        let offset = self.pos;
        if !matches!(self.bump()?, b'b' | b'B') {
            return Err(ListingError::Expected {
                expected: "bytes literal",
                offset,
            });
        }
        let quote = match self.bump()? {
            q @ (b'\'' | b'"') => q,
            _ => {
                return Err(ListingError::Expected {
                    expected: "quote",
                    offset: offset + 1,
                })
            }
        };

        let mut out = Vec::new();
        loop {
            let offset = self.pos;
            match self.bump()? {
                b if b == quote => return Ok(out),
                b'\\' => self.escape(&mut out, offset)?,
                b'\n' | b'\r' => {
                    return Err(ListingError::Expected {
                        expected: "closing quote",
                        offset,
                    })
                }
                b if b.is_ascii() => out.push(b),
                _ => return Err(ListingError::NonAscii(offset)),
            }
        }
    }

    fn escape(&mut self, out: &mut Vec<u8>, offset: usize) -> Result<(), ListingError> {
        match self.bump()? {
            // line continuation
            b'\n' => {}
            b'\r' => {
                self.eat(b'\n');
            }
            b @ (b'\\' | b'\'' | b'"') => out.push(b),
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'v' => out.push(0x0b),
            b'x' => {
                let hi = self.hex_digit(offset)?;
                let lo = self.hex_digit(offset)?;
                out.push(hi << 4 | lo);
            }
            d @ b'0'..=b'7' => {
                let mut value = u32::from(d - b'0');
                for _ in 0..2 {
                    match self.peek() {
                        Some(d @ b'0'..=b'7') => {
                            self.pos += 1;
                            value = value * 8 + u32::from(d - b'0');
                        }
                        _ => break,
                    }
                }
                out.push(u8::try_from(value).map_err(|_| ListingError::InvalidEscape(offset))?);
            }
            // Unknown escapes keep their backslash
            b if b.is_ascii() => {
                out.push(b'\\');
                out.push(b);
            }
            _ => return Err(ListingError::NonAscii(self.pos - 1)),
        }
        Ok(())
    }

    fn hex_digit(&mut self, offset: usize) -> Result<u8, ListingError> {
        let b = self.bump()?;
        char::from(b)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or(ListingError::InvalidEscape(offset))
    }
}
