use chrono::{NaiveDate, NaiveTime, TimeDelta};
use std::fmt;

//==============================================================================
// Cell Values
//==============================================================================

/// A single scalar cell value as read from (or written to) a worksheet
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Spreadsheet date serial (days since 1899-12-30, fraction = time of day)
    DateTime(f64),
    /// Duration serial (days, fraction = time)
    Duration(f64),
    /// Error code such as `#N/A` or `#DIV/0!`
    Error(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::DateTime(serial) => write!(f, "{}", format_serial_date(*serial)),
            CellValue::Duration(serial) => write!(f, "{}", format_duration(*serial)),
            CellValue::Error(code) => write!(f, "{}", code),
        }
    }
}

/// Format a number for display, removing unnecessary decimal places
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return format!("{}", n as i64);
    }
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Render a date serial as `YYYY-MM-DD` (plus `HH:MM:SS` when a time part exists)
///
/// Serials are rounded to the second first, so a time that rounds up to
/// midnight rolls over to the next date.
pub fn format_serial_date(serial: f64) -> String {
    let Some(stamp) = serial_seconds(serial).and_then(|secs| {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
            .and_time(NaiveTime::MIN)
            .checked_add_signed(TimeDelta::try_seconds(secs)?)
    }) else {
        return format_number(serial);
    };
    if stamp.time() == NaiveTime::MIN {
        stamp.format("%Y-%m-%d").to_string()
    } else {
        stamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

fn format_duration(serial: f64) -> String {
    let Some(delta) = serial_seconds(serial).and_then(TimeDelta::try_seconds) else {
        return format_number(serial);
    };
    let sign = if delta < TimeDelta::zero() { "-" } else { "" };
    let delta = delta.abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        delta.num_hours(),
        delta.num_minutes() % 60,
        delta.num_seconds() % 60
    )
}

/// Whole seconds in a day-based serial, `None` for non-finite input
fn serial_seconds(serial: f64) -> Option<i64> {
    let secs = (serial * 86_400.0).round();
    (secs.is_finite() && secs.abs() < i64::MAX as f64).then_some(secs as i64)
}

//==============================================================================
// Selection
//==============================================================================

/// Raw value of the user's current selection, as the application reports it
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// No range selected, or the selection holds no values
    Nothing,
    /// Exactly one cell selected; automation surfaces hand back a bare scalar
    Scalar(CellValue),
    /// A rectangular block of cells, row-major
    Grid(Vec<Vec<CellValue>>),
}

impl Selection {
    /// Collapse the selection to a uniform 2D grid.
    ///
    /// A single scalar cell becomes a 1×1 grid. Returns `None` when nothing
    /// is selected.
    pub fn normalize(self) -> Option<Vec<Vec<CellValue>>> {
        match self {
            Selection::Nothing => None,
            Selection::Scalar(value) => Some(vec![vec![value]]),
            Selection::Grid(rows) if rows.is_empty() => None,
            Selection::Grid(rows) => Some(rows),
        }
    }
}

//==============================================================================
// Table
//==============================================================================

/// Header row plus data rows; every row has exactly `header.len()` cells
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub header: Vec<CellValue>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table from a grid whose first row is the header.
    ///
    /// Data rows are padded with empty cells or truncated to header length.
    pub fn from_grid(grid: Vec<Vec<CellValue>>) -> Self {
        let mut iter = grid.into_iter();
        let header = iter.next().unwrap_or_default();
        let width = header.len();
        let rows = iter
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self { header, rows }
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Header followed by data rows, ready for a range write
    pub fn to_grid(&self) -> Vec<Vec<CellValue>> {
        let mut grid = Vec::with_capacity(self.rows.len() + 1);
        grid.push(self.header.clone());
        grid.extend(self.rows.iter().cloned());
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_selection_normalizes_to_one_by_one() {
        let grid = Selection::Scalar(CellValue::from("Dept")).normalize();
        assert_eq!(grid, Some(vec![vec![CellValue::from("Dept")]]));
    }

    #[test]
    fn test_nothing_selected_normalizes_to_none() {
        assert_eq!(Selection::Nothing.normalize(), None);
        assert_eq!(Selection::Grid(vec![]).normalize(), None);
    }

    #[test]
    fn test_from_grid_pads_and_truncates_rows() {
        let table = Table::from_grid(vec![
            vec!["a".into(), "b".into()],
            vec![1.into()],
            vec![1.into(), 2.into(), 3.into()],
        ]);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.rows[0], vec![CellValue::Number(1.0), CellValue::Empty]);
        assert_eq!(table.rows[1].len(), 2);
    }

    #[test]
    fn test_from_grid_header_only() {
        let table = Table::from_grid(vec![vec!["Dept".into(), "Jan".into()]]);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.to_grid().len(), 1);
    }

    #[test]
    fn test_display_values() {
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Bool(true).to_string(), "TRUE");
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::DateTime(45292.0).to_string(), "2024-01-01");
        assert_eq!(CellValue::DateTime(45292.5).to_string(), "2024-01-01 12:00:00");
        assert_eq!(CellValue::Duration(1.5).to_string(), "36:00:00");
    }

    #[test]
    fn test_date_time_rounding_rolls_over_midnight() {
        assert_eq!(CellValue::DateTime(45292.999999).to_string(), "2024-01-02");
        assert_eq!(
            CellValue::DateTime(45292.99998).to_string(),
            "2024-01-01 23:59:58"
        );
        assert_eq!(CellValue::DateTime(59.0).to_string(), "1900-02-27");
        assert_eq!(CellValue::DateTime(-1.0).to_string(), "1899-12-29");
    }

    #[test]
    fn test_out_of_range_serials_fall_back_to_numbers() {
        assert_eq!(CellValue::DateTime(f64::NAN).to_string(), "NaN");
        assert_eq!(CellValue::DateTime(1e300).to_string(), format_number(1e300));
        assert_eq!(CellValue::Duration(-0.25).to_string(), "-6:00:00");
    }
}
