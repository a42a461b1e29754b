//! FILENAME: engine/src/coord.rs
//! PURPOSE: A1-style rendering of 0-based grid positions.
//! CONTEXT: Structural errors name the cell where an anchor was expected,
//! and the report writer addresses its totals column by letter. Column "A"
//! is 0, "Z" is 25, "AA" is 26; row 1 in A1 notation is row 0 internally.

use std::fmt;

/// A cell coordinate as (row, col) with 0-based indices.
pub type CellCoord = (u32, u32);

/// Converts a 0-based column index to its letters: 0 -> "A", 26 -> "AA".
pub fn index_to_col(mut col_index: u32) -> String {
    let mut result = String::new();
    loop {
        let remainder = col_index % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if col_index < 26 {
            break;
        }
        col_index = col_index / 26 - 1;
    }
    result
}

/// Converts column letters to a 0-based index: "A" -> 0, "AA" -> 26.
/// Returns `None` for an empty string or any non-ASCII-letter character.
pub fn col_to_index(col_str: &str) -> Option<u32> {
    if col_str.is_empty() {
        return None;
    }
    let mut result: u32 = 0;
    for c in col_str.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        result = result.checked_mul(26)?.checked_add(digit)?;
    }
    Some(result - 1)
}

/// Display wrapper printing a coordinate in A1 notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct A1(pub CellCoord);

impl fmt::Display for A1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (row, col) = self.0;
        write!(f, "{}{}", index_to_col(col), row + 1)
    }
}
