#![deny(unsafe_code)]

use chrono::NaiveDate;

/// An untyped spreadsheet cell as produced by the file codec.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Empty,
}

impl CellValue {
    /// Build a cell from text, mapping whitespace-only input to [`CellValue::Empty`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }

    /// Returns true for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(text) => text.trim().is_empty(),
            CellValue::Number(value) => value.is_nan(),
            CellValue::Date(_) => false,
            CellValue::Empty => true,
        }
    }

    /// Trimmed textual rendering of the cell.
    ///
    /// Integral numbers render without a fractional part so that a national ID
    /// typed into a numeric spreadsheet column reads back as `123`, not `123.0`.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Text(text) => text.trim().to_string(),
            CellValue::Number(value) => format_number(*value),
            CellValue::Date(date) => date.format("%Y-%m-%d").to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

/// Formats a floating-point number without trailing zeros.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let s = format!("{value}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// One spreadsheet row: column labels mapped to cells, in file order.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
    /// Row number in the source file, when the codec knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_row: Option<usize>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the row to its position in the source file (header is row 1).
    #[must_use]
    pub fn at_source_row(mut self, row: usize) -> Self {
        self.source_row = Some(row);
        self
    }

    pub fn source_row(&self) -> Option<usize> {
        self.source_row
    }

    /// Append a cell. A repeated label keeps the first occurrence for lookups.
    pub fn push(&mut self, label: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.push((label.into(), value.into()));
    }

    /// Builder-style variant of [`RawRow::push`].
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.push(label, value);
        self
    }

    /// Look up a cell by label. Surrounding whitespace on either side is ignored.
    pub fn get(&self, label: &str) -> Option<&CellValue> {
        let wanted = label.trim();
        self.cells
            .iter()
            .find(|(name, _)| name.trim() == wanted)
            .map(|(_, value)| value)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn cells(&self) -> &[(String, CellValue)] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<L, V> FromIterator<(L, V)> for RawRow
where
    L: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (L, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (label, value) in iter {
            row.push(label, value);
        }
        row
    }
}
