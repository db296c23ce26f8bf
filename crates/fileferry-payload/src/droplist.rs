//! Legacy flat path-list drop descriptor parsing.
//!
//! Layout: a 20-byte header whose first four bytes are the little-endian
//! offset of the path table and whose last four bytes are a nonzero value
//! when the table holds UTF-16LE code units (ANSI bytes otherwise),
//! followed by a table of null-terminated paths ending in a double null.

use std::path::PathBuf;

use thiserror::Error;

/// Header length of the drop descriptor.
const HEADER_LEN: usize = 20;

/// Why a raw payload could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// The descriptor is shorter than its fixed header.
    #[error("drop descriptor header is truncated ({0} of {HEADER_LEN} bytes)")]
    TruncatedHeader(usize),

    /// The header points outside the descriptor.
    #[error("path table offset {offset} is out of bounds ({len} bytes)")]
    BadOffset { offset: usize, len: usize },

    /// The path table is missing its double-null terminator.
    #[error("path table is missing its terminator")]
    UnterminatedTable,
}

/// Parse the raw descriptor and walk its null-terminated path table.
pub fn parse_drop_list(data: &[u8]) -> Result<Vec<PathBuf>, PayloadError> {
    if data.len() < HEADER_LEN {
        return Err(PayloadError::TruncatedHeader(data.len()));
    }
    let offset = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
    let wide = u32::from_le_bytes([data[16], data[17], data[18], data[19]]) != 0;
    if offset < HEADER_LEN || offset > data.len() {
        return Err(PayloadError::BadOffset {
            offset,
            len: data.len(),
        });
    }
    let table = &data[offset..];
    if wide {
        parse_wide_table(table)
    } else {
        parse_ansi_table(table)
    }
}

fn parse_wide_table(table: &[u8]) -> Result<Vec<PathBuf>, PayloadError> {
    let mut paths = Vec::new();
    let mut current: Vec<u16> = Vec::new();
    for chunk in table.chunks_exact(2) {
        let unit = u16::from_le_bytes([chunk[0], chunk[1]]);
        if unit != 0 {
            current.push(unit);
            continue;
        }
        if current.is_empty() {
            // Second consecutive null: end of table.
            return Ok(paths);
        }
        paths.push(PathBuf::from(String::from_utf16_lossy(&current)));
        current.clear();
    }
    Err(PayloadError::UnterminatedTable)
}

fn parse_ansi_table(table: &[u8]) -> Result<Vec<PathBuf>, PayloadError> {
    let mut paths = Vec::new();
    let mut current: Vec<u8> = Vec::new();
    for &byte in table {
        if byte != 0 {
            current.push(byte);
            continue;
        }
        if current.is_empty() {
            return Ok(paths);
        }
        paths.push(PathBuf::from(String::from_utf8_lossy(&current).into_owned()));
        current.clear();
    }
    Err(PayloadError::UnterminatedTable)
}
