//! A1-style cell and column references

use rust_xlsxwriter::{ColNum, RowNum};
use std::fmt;

/// Number of rows in an .xlsx worksheet
pub const MAX_ROWS: u32 = 1_048_576;
/// Number of columns in an .xlsx worksheet (A..XFD)
pub const MAX_COLUMNS: u16 = 16_384;

/// Zero-based cell position parsed from an A1 reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub row: RowNum,
    pub col: ColNum,
}

impl CellRef {
    pub fn new(row: RowNum, col: ColNum) -> Self {
        Self { row, col }
    }

    /// Parse an A1 reference such as `B7` or `$B$7`
    pub fn parse(reference: &str) -> Result<Self, String> {
        let clean: String = reference.trim().chars().filter(|&c| c != '$').collect();
        let split = clean
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(clean.len());
        let (letters, digits) = clean.split_at(split);

        if letters.is_empty() || digits.is_empty() {
            return Err(format!("'{}' is not an A1 cell reference", reference));
        }

        let col = column_letter_to_index(letters)
            .ok_or_else(|| format!("column '{}' in '{}' is out of range", letters, reference))?;

        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("'{}' is not an A1 cell reference", reference));
        }
        let row: u32 = digits
            .parse()
            .map_err(|_| format!("row '{}' in '{}' is out of range", digits, reference))?;
        if row == 0 || row > MAX_ROWS {
            return Err(format!("row '{}' in '{}' is out of range", digits, reference));
        }

        Ok(Self { row: row - 1, col })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_index_to_letter(self.col), self.row + 1)
    }
}

/// Convert a column index to its letters
///
/// Examples:
/// - 0 → A
/// - 25 → Z
/// - 26 → AA
pub fn column_index_to_letter(index: ColNum) -> String {
    let mut result = String::new();
    let mut idx = index as usize;

    loop {
        let remainder = idx % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }

    result
}

/// Convert column letters (case-insensitive) to a zero-based index.
/// Returns None for anything outside A..XFD.
pub fn column_letter_to_index(letters: &str) -> Option<ColNum> {
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }

    let mut index: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        index = index * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }

    if index == 0 || index > u32::from(MAX_COLUMNS) {
        return None;
    }
    Some((index - 1) as ColNum)
}

/// Parse a column identifier: a single column (`C`) or an inclusive span (`C:F`)
pub fn parse_column_span(spec: &str) -> Result<(ColNum, ColNum), String> {
    let clean = spec.trim().replace('$', "");
    let (first, last) = match clean.split_once(':') {
        Some((a, b)) => (a, b),
        None => (clean.as_str(), clean.as_str()),
    };

    let first_col = column_letter_to_index(first)
        .ok_or_else(|| format!("'{}' is not a column between A and XFD", spec))?;
    let last_col = column_letter_to_index(last)
        .ok_or_else(|| format!("'{}' is not a column between A and XFD", spec))?;

    if first_col > last_col {
        return Err(format!("column span '{}' is reversed", spec));
    }
    Ok((first_col, last_col))
}
