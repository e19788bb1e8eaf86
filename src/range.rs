//! A1-style range references (`Sheet1!B2:F20`, `'My Sheet'!A1`, `C3`)

use regex::Regex;
use std::fmt;
use thiserror::Error;

/// Last column spreadsheet applications address (`XFD`)
pub const MAX_COLUMNS: usize = 16_384;
/// Last row spreadsheet applications address
pub const MAX_ROWS: usize = 1_048_576;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("'{0}' is not a valid range reference (expected e.g. Sheet1!B2:F20)")]
    Syntax(String),

    #[error("'{0}' is outside the sheet bounds")]
    OutOfBounds(String),

    #[error("Regex error: {0}")]
    Pattern(String),
}

/// Zero-based cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_index_to_letter(self.col), self.row + 1)
    }
}

/// Rectangular range, optionally bound to a sheet; corners are inclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRef {
    pub sheet: Option<String>,
    pub start: CellRef,
    pub end: CellRef,
}

impl RangeRef {
    pub fn new(sheet: Option<String>, a: CellRef, b: CellRef) -> Self {
        Self {
            sheet,
            start: CellRef::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellRef::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn height(&self) -> usize {
        self.end.row - self.start.row + 1
    }

    pub fn width(&self) -> usize {
        self.end.col - self.start.col + 1
    }

    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }

    /// Parse a reference such as `Sheet1!B2:F20`.
    pub fn parse(input: &str) -> Result<Self, RangeError> {
        // [Sheet!]A1[:B2], sheet optionally quoted with '' as an escaped quote
        let re = Regex::new(
            r"^(?:(?:'((?:[^']|'')+)'|([^!'\s][^!]*))!)?\$?([A-Za-z]{1,3})\$?([0-9]+)(?::\$?([A-Za-z]{1,3})\$?([0-9]+))?$",
        )
        .map_err(|e| RangeError::Pattern(e.to_string()))?;

        let trimmed = input.trim();
        let caps = re
            .captures(trimmed)
            .ok_or_else(|| RangeError::Syntax(trimmed.to_string()))?;

        let sheet = caps
            .get(1)
            .map(|m| m.as_str().replace("''", "'"))
            .or_else(|| caps.get(2).map(|m| m.as_str().trim().to_string()));

        let cell = |col: &str, row: &str| -> Result<CellRef, RangeError> {
            let col = column_letter_to_index(col)
                .ok_or_else(|| RangeError::OutOfBounds(trimmed.to_string()))?;
            let row: usize = row
                .parse()
                .map_err(|_| RangeError::OutOfBounds(trimmed.to_string()))?;
            if row == 0 || row > MAX_ROWS {
                return Err(RangeError::OutOfBounds(trimmed.to_string()));
            }
            Ok(CellRef::new(row - 1, col))
        };

        let start = cell(&caps[3], &caps[4])?;
        let end = match (caps.get(5), caps.get(6)) {
            (Some(c), Some(r)) => cell(c.as_str(), r.as_str())?,
            _ => start,
        };

        Ok(Self::new(sheet, start, end))
    }
}

impl fmt::Display for RangeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sheet) = &self.sheet {
            if sheet.chars().all(|c| c.is_alphanumeric() || c == '_') {
                write!(f, "{}!", sheet)?;
            } else {
                write!(f, "'{}'!", sheet.replace('\'', "''"))?;
            }
        }
        if self.is_single_cell() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

/// Convert a 0-based column index to Excel letters (0 → A, 26 → AA)
pub fn column_index_to_letter(index: usize) -> String {
    let mut result = String::new();
    let mut idx = index;

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

/// Convert Excel column letters to a 0-based index; `None` past `XFD`
pub fn column_letter_to_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut index = 0usize;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        index = index * 26 + (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
    }
    if index > MAX_COLUMNS {
        return None;
    }
    Some(index - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_index_to_letter(0), "A");
        assert_eq!(column_index_to_letter(25), "Z");
        assert_eq!(column_index_to_letter(26), "AA");
        assert_eq!(column_index_to_letter(16_383), "XFD");
        assert_eq!(column_letter_to_index("A"), Some(0));
        assert_eq!(column_letter_to_index("ab"), Some(27));
        assert_eq!(column_letter_to_index("XFD"), Some(16_383));
        assert_eq!(column_letter_to_index("XFE"), None);
    }

    #[test]
    fn test_parse_with_sheet() {
        let r = RangeRef::parse("Sheet1!B2:F20").unwrap();
        assert_eq!(r.sheet.as_deref(), Some("Sheet1"));
        assert_eq!(r.start, CellRef::new(1, 1));
        assert_eq!(r.end, CellRef::new(19, 5));
        assert_eq!(r.width(), 5);
        assert_eq!(r.height(), 19);
    }

    #[test]
    fn test_parse_quoted_sheet() {
        let r = RangeRef::parse("'Q1 ''Sales'''!$A$1:$C$3").unwrap();
        assert_eq!(r.sheet.as_deref(), Some("Q1 'Sales'"));
        assert_eq!(r.to_string(), "'Q1 ''Sales'''!A1:C3");
    }

    #[test]
    fn test_parse_single_cell_and_reversed_corners() {
        let single = RangeRef::parse("c3").unwrap();
        assert!(single.is_single_cell());
        assert_eq!(single.sheet, None);
        assert_eq!(single.to_string(), "C3");

        let reversed = RangeRef::parse("D5:B2").unwrap();
        assert_eq!(reversed, RangeRef::parse("B2:D5").unwrap());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(RangeRef::parse(""), Err(RangeError::Syntax(_))));
        assert!(matches!(RangeRef::parse("hello"), Err(RangeError::Syntax(_))));
        assert!(matches!(RangeRef::parse("A0"), Err(RangeError::OutOfBounds(_))));
        assert!(matches!(
            RangeRef::parse("ZZZ1"),
            Err(RangeError::OutOfBounds(_))
        ));
    }
}
