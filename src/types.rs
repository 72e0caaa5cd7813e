use serde::{Deserialize, Serialize};
use serde_json::Value;

//==============================================================================
// Document Model
//==============================================================================

/// A workbook document as read from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    /// Output path stored in the document, used when none is given on the CLI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub worksheets: Vec<WorksheetSpec>,
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_worksheet(&mut self, worksheet: WorksheetSpec) {
        self.worksheets.push(worksheet);
    }

    /// Total number of cell entries across all worksheets
    pub fn cell_count(&self) -> usize {
        self.worksheets.iter().map(|ws| ws.cells.len()).sum()
    }
}

/// One worksheet: its name plus column, row and cell instructions in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorksheetSpec {
    #[serde(rename = "sheet")]
    pub name: String,
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<RowSpec>,
    pub cells: Vec<CellSpec>,
}

impl WorksheetSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add_column(&mut self, column: ColumnSpec) {
        self.columns.push(column);
    }

    pub fn add_row(&mut self, row: RowSpec) {
        self.rows.push(row);
    }

    pub fn add_cell(&mut self, cell: CellSpec) {
        self.cells.push(cell);
    }
}

/// Column sizing. `column` is a letter ("B") or a span ("B:D").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSpec {
    pub column: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl ColumnSpec {
    pub fn new(column: impl Into<String>, width: Option<f64>) -> Self {
        Self {
            column: column.into(),
            width,
        }
    }
}

/// Row sizing. `row` is 1-based as in Excel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowSpec {
    pub row: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl RowSpec {
    pub fn new(row: u32, height: Option<f64>) -> Self {
        Self { row, height }
    }
}

/// A single cell instruction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellSpec {
    #[serde(rename = "cell")]
    pub address: String,
    pub value: CellValue,
    /// Bottom-right corner of a merge anchored at `address`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl CellSpec {
    pub fn new(address: impl Into<String>, value: impl Into<CellValue>) -> Self {
        Self {
            address: address.into(),
            value: value.into(),
            merge: None,
            style: None,
        }
    }

    pub fn with_merge(mut self, target: impl Into<String>) -> Self {
        self.merge = Some(target.into());
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

//==============================================================================
// Cell Values
//==============================================================================

/// Cell value, typed by the JSON value it came from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "Empty",
            CellValue::Bool(_) => "Boolean",
            CellValue::Number(_) => "Number",
            CellValue::Text(_) => "Text",
        }
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Bool(b),
            // Every JSON number has an f64 view; integers beyond 2^53 lose precision as in Excel
            Value::Number(n) => CellValue::Number(n.as_f64().unwrap_or_default()),
            Value::String(s) => CellValue::Text(s),
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl From<CellValue> for Value {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Empty => Value::Null,
            CellValue::Bool(b) => Value::Bool(b),
            CellValue::Number(n) => serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Text(s) => Value::String(s),
        }
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

//==============================================================================
// Styles
//==============================================================================

/// Cell style. Every part is optional; absent parts keep the Excel default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub borders: Vec<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protection: Option<Protection>,
    /// Built-in number format index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_fmt: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_num_fmt: Option<String>,
}

impl Style {
    /// True when the style carries nothing that would change the default format
    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Border {
    /// left, right, top, bottom, diagonalUp or diagonalDown
    #[serde(rename = "type")]
    pub side: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Line style code, 0 (none) to 13 (slantDashDot)
    pub style: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fill {
    /// "pattern" or "gradient"
    #[serde(rename = "type")]
    pub fill_type: String,
    /// Pattern code, 0 (none) to 18 (gray0625)
    pub pattern: u32,
    #[serde(alias = "colors")]
    pub color: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shading: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_indexed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_theme: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_tint: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vert_align: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alignment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_last_line: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_indent: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shrink_to_fit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_rotation: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_text: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Protection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}
