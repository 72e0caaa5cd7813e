//! Workbook builder: replays a `Book` against `rust_xlsxwriter`

use super::address::{parse_column_span, CellRef, MAX_ROWS};
use super::style::build_format;
use crate::error::{ConvertError, ConvertResult};
use crate::types::{Book, CellSpec, CellValue, ColumnSpec, RowSpec, WorksheetSpec};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// Widest column Excel allows, in character units
pub const MAX_COLUMN_WIDTH: f64 = 255.0;
/// Tallest row Excel allows, in points
pub const MAX_ROW_HEIGHT: f64 = 409.0;

/// Builds an .xlsx workbook from a parsed document.
///
/// Worksheets, columns, rows and cells are applied strictly in document
/// order and the first failure aborts the build. The workbook starts with no
/// sheets, so the output holds exactly the document's worksheets.
pub struct WorkbookBuilder {
    book: Book,
}

impl WorkbookBuilder {
    pub fn new(book: Book) -> Self {
        Self { book }
    }

    /// Build the workbook and write it to `output_path`, replacing any
    /// existing file.
    pub fn build_to_file(&self, output_path: &Path) -> ConvertResult<()> {
        let bytes = self.build_to_buffer()?;

        // The target is only touched once the whole file is assembled
        std::fs::write(output_path, &bytes)
            .map_err(|e| ConvertError::file_access(output_path, e))?;

        info!(
            path = %output_path.display(),
            bytes = bytes.len(),
            "saved workbook"
        );
        Ok(())
    }

    /// Build the workbook and return the .xlsx file contents
    pub fn build_to_buffer(&self) -> ConvertResult<Vec<u8>> {
        let mut workbook = self.build()?;
        workbook
            .save_to_buffer()
            .map_err(|e| ConvertError::Write(e.to_string()))
    }

    /// Build the in-memory workbook
    pub fn build(&self) -> ConvertResult<Workbook> {
        let mut workbook = Workbook::new();
        let mut sheet_names: HashSet<String> = HashSet::new();

        for spec in &self.book.worksheets {
            // Excel compares sheet names case-insensitively
            if !sheet_names.insert(spec.name.to_lowercase()) {
                return Err(ConvertError::Sheet(format!(
                    "duplicate worksheet name '{}'",
                    spec.name
                )));
            }

            let worksheet = build_worksheet(spec)?;
            workbook.push_worksheet(worksheet);
        }

        Ok(workbook)
    }
}

/// Build one worksheet: name, column widths, row heights, then cells
fn build_worksheet(spec: &WorksheetSpec) -> ConvertResult<Worksheet> {
    info!(
        sheet = %spec.name,
        columns = spec.columns.len(),
        rows = spec.rows.len(),
        cells = spec.cells.len(),
        "building worksheet"
    );

    let mut worksheet = Worksheet::new();
    worksheet
        .set_name(&spec.name)
        .map_err(|e| ConvertError::Sheet(format!("invalid worksheet name '{}': {}", spec.name, e)))?;

    for column in &spec.columns {
        apply_column(&mut worksheet, &spec.name, column)?;
    }
    for row in &spec.rows {
        apply_row(&mut worksheet, &spec.name, row)?;
    }

    let mut writer = CellWriter::new(&spec.name);
    for cell in &spec.cells {
        writer.write(&mut worksheet, cell)?;
    }
    writer.finish(&mut worksheet)?;

    Ok(worksheet)
}

fn apply_column(worksheet: &mut Worksheet, sheet: &str, column: &ColumnSpec) -> ConvertResult<()> {
    let (first, last) = parse_column_span(&column.column)
        .map_err(|e| ConvertError::Dimension(format!("sheet '{}': {}", sheet, e)))?;

    let Some(width) = column.width else {
        return Ok(());
    };
    if !width.is_finite() || !(0.0..=MAX_COLUMN_WIDTH).contains(&width) {
        return Err(ConvertError::Dimension(format!(
            "sheet '{}': column '{}' width {} must be between 0 and {}",
            sheet, column.column, width, MAX_COLUMN_WIDTH
        )));
    }

    for col in first..=last {
        worksheet.set_column_width(col, width).map_err(|e| {
            ConvertError::Dimension(format!(
                "sheet '{}': failed to set width of column '{}': {}",
                sheet, column.column, e
            ))
        })?;
    }
    Ok(())
}

fn apply_row(worksheet: &mut Worksheet, sheet: &str, row: &RowSpec) -> ConvertResult<()> {
    if row.row == 0 || row.row > MAX_ROWS {
        return Err(ConvertError::Dimension(format!(
            "sheet '{}': row {} is out of range (1-{})",
            sheet, row.row, MAX_ROWS
        )));
    }

    let Some(height) = row.height else {
        return Ok(());
    };
    if !height.is_finite() || !(0.0..=MAX_ROW_HEIGHT).contains(&height) {
        return Err(ConvertError::Dimension(format!(
            "sheet '{}': row {} height {} must be between 0 and {}",
            sheet, row.row, height, MAX_ROW_HEIGHT
        )));
    }

    worksheet.set_row_height(row.row - 1, height).map_err(|e| {
        ConvertError::Dimension(format!(
            "sheet '{}': failed to set height of row {}: {}",
            sheet, row.row, e
        ))
    })?;
    Ok(())
}

/// Rectangular merged area, anchor at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MergeArea {
    first: CellRef,
    last: CellRef,
}

impl MergeArea {
    fn overlaps(&self, other: &MergeArea) -> bool {
        self.first.row <= other.last.row
            && other.first.row <= self.last.row
            && self.first.col <= other.last.col
            && other.first.col <= self.last.col
    }

    fn contains(&self, at: CellRef) -> bool {
        (self.first.row..=self.last.row).contains(&at.row)
            && (self.first.col..=self.last.col).contains(&at.col)
    }
}

/// Writes cells into one worksheet, remembering the format applied at each
/// address so a later value-only write keeps the cell's style.
///
/// Merges are collected while cells are written and applied by `finish`, so
/// a later merge can replace an earlier one it overlaps.
struct CellWriter<'a> {
    sheet: &'a str,
    formats: HashMap<CellRef, Format>,
    values: HashMap<CellRef, CellValue>,
    merges: Vec<MergeArea>,
}

impl<'a> CellWriter<'a> {
    fn new(sheet: &'a str) -> Self {
        Self {
            sheet,
            formats: HashMap::new(),
            values: HashMap::new(),
            merges: Vec::new(),
        }
    }

    fn write(&mut self, worksheet: &mut Worksheet, cell: &CellSpec) -> ConvertResult<()> {
        let anchor = CellRef::parse(&cell.address).map_err(|e| {
            ConvertError::CellWrite(format!("sheet '{}': {}", self.sheet, e))
        })?;

        debug!(
            sheet = self.sheet,
            cell = %anchor,
            kind = cell.value.type_name(),
            merge = ?cell.merge,
            styled = cell.style.as_ref().is_some_and(|s| !s.is_empty()),
            "writing cell"
        );

        if let Some(style) = &cell.style {
            let format = build_format(style).map_err(|e| match e {
                ConvertError::Style(msg) => ConvertError::Style(format!(
                    "sheet '{}' cell {}: {}",
                    self.sheet, anchor, msg
                )),
                other => other,
            })?;
            self.formats.insert(anchor, format);
        }

        if let Some(target) = cell.merge.as_deref().filter(|t| !t.is_empty()) {
            self.merge(anchor, target)?;
        }

        if let Some(area) = self
            .merges
            .iter()
            .find(|m| m.contains(anchor) && m.first != anchor)
        {
            debug!(
                sheet = self.sheet,
                cell = %anchor,
                area = %format!("{}:{}", area.first, area.last),
                "cell lies inside a merged area; its value is hidden"
            );
        }

        self.write_value(worksheet, anchor, &cell.value)?;
        self.values.insert(anchor, cell.value.clone());
        Ok(())
    }

    /// Record the merge `anchor:target`. The anchor must be the top-left
    /// corner. Earlier merges overlapping the new area are dropped.
    fn merge(&mut self, anchor: CellRef, target: &str) -> ConvertResult<()> {
        let end = CellRef::parse(target).map_err(|e| {
            ConvertError::Merge(format!(
                "sheet '{}' cell {}: invalid merge target: {}",
                self.sheet, anchor, e
            ))
        })?;

        if end.row < anchor.row || end.col < anchor.col {
            return Err(ConvertError::Merge(format!(
                "sheet '{}': merge target {} lies above or left of anchor {}",
                self.sheet, end, anchor
            )));
        }
        if end == anchor {
            return Err(ConvertError::Merge(format!(
                "sheet '{}': cannot merge single cell {}",
                self.sheet, anchor
            )));
        }

        let area = MergeArea {
            first: anchor,
            last: end,
        };
        let before = self.merges.len();
        self.merges.retain(|m| !m.overlaps(&area));
        if self.merges.len() != before {
            debug!(
                sheet = self.sheet,
                area = %format!("{}:{}", anchor, end),
                replaced = before - self.merges.len(),
                "merge replaces overlapping merged areas"
            );
        }
        self.merges.push(area);
        Ok(())
    }

    /// Apply the surviving merges, then restore each anchor's value
    fn finish(self, worksheet: &mut Worksheet) -> ConvertResult<()> {
        let default_format = Format::new();

        for area in &self.merges {
            let MergeArea { first, last } = *area;
            let format = self.formats.get(&first).unwrap_or(&default_format);

            // merge_range fills the anchor with a string; the real value is written afterwards
            worksheet
                .merge_range(first.row, first.col, last.row, last.col, "", format)
                .map_err(|e| {
                    ConvertError::Merge(format!(
                        "sheet '{}': cannot merge {}:{}: {}",
                        self.sheet, first, last, e
                    ))
                })?;

            let value = self.values.get(&first).cloned().unwrap_or_default();
            self.write_value(worksheet, first, &value)?;
        }
        Ok(())
    }

    fn write_value(
        &self,
        worksheet: &mut Worksheet,
        at: CellRef,
        value: &CellValue,
    ) -> ConvertResult<()> {
        let CellRef { row, col } = at;
        let format = self.formats.get(&at);

        let result = match (value, format) {
            (CellValue::Text(s), Some(f)) => worksheet.write_string_with_format(row, col, s, f),
            (CellValue::Text(s), None) => worksheet.write_string(row, col, s),
            (CellValue::Number(n), Some(f)) => worksheet.write_number_with_format(row, col, *n, f),
            (CellValue::Number(n), None) => worksheet.write_number(row, col, *n),
            (CellValue::Bool(b), Some(f)) => worksheet.write_boolean_with_format(row, col, *b, f),
            (CellValue::Bool(b), None) => worksheet.write_boolean(row, col, *b),
            (CellValue::Empty, Some(f)) => worksheet.write_blank(row, col, f),
            (CellValue::Empty, None) => Ok(worksheet.clear_cell(row, col)),
        };

        result.map(|_| ()).map_err(|e| {
            ConvertError::CellWrite(format!(
                "sheet '{}' cell {}: cannot write {} value: {}",
                self.sheet,
                at,
                value.type_name().to_lowercase(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(name: &str) -> WorksheetSpec {
        WorksheetSpec::new(name)
    }

    #[test]
    fn test_duplicate_sheet_names_rejected() {
        let mut book = Book::new();
        book.add_worksheet(sheet("Data"));
        book.add_worksheet(sheet("data"));

        let result = WorkbookBuilder::new(book).build();
        assert!(matches!(result, Err(ConvertError::Sheet(_))));
    }

    #[test]
    fn test_invalid_sheet_name_rejected() {
        let mut book = Book::new();
        book.add_worksheet(sheet("bad[name]"));

        let result = WorkbookBuilder::new(book).build();
        assert!(matches!(result, Err(ConvertError::Sheet(_))));
    }

    #[test]
    fn test_column_width_out_of_range() {
        let mut ws = sheet("S1");
        ws.add_column(ColumnSpec::new("A", Some(300.0)));
        let mut book = Book::new();
        book.add_worksheet(ws);

        let result = WorkbookBuilder::new(book).build();
        assert!(matches!(result, Err(ConvertError::Dimension(_))));
    }

    #[test]
    fn test_negative_row_height_rejected() {
        let mut ws = sheet("S1");
        ws.add_row(RowSpec::new(3, Some(-1.0)));
        let mut book = Book::new();
        book.add_worksheet(ws);

        let result = WorkbookBuilder::new(book).build();
        assert!(matches!(result, Err(ConvertError::Dimension(_))));
    }

    #[test]
    fn test_row_zero_rejected() {
        let mut ws = sheet("S1");
        ws.add_row(RowSpec::new(0, Some(20.0)));
        let mut book = Book::new();
        book.add_worksheet(ws);

        let result = WorkbookBuilder::new(book).build();
        assert!(matches!(result, Err(ConvertError::Dimension(_))));
    }

    #[test]
    fn test_invalid_cell_address() {
        let mut ws = sheet("S1");
        ws.add_cell(CellSpec::new("1A", "x"));
        let mut book = Book::new();
        book.add_worksheet(ws);

        let result = WorkbookBuilder::new(book).build();
        assert!(matches!(result, Err(ConvertError::CellWrite(_))));
    }

    #[test]
    fn test_merge_target_before_anchor() {
        let mut ws = sheet("S1");
        ws.add_cell(CellSpec::new("B2", "x").with_merge("A1"));
        let mut book = Book::new();
        book.add_worksheet(ws);

        let result = WorkbookBuilder::new(book).build();
        assert!(matches!(result, Err(ConvertError::Merge(_))));
    }

    #[test]
    fn test_single_cell_merge_rejected() {
        let mut ws = sheet("S1");
        ws.add_cell(CellSpec::new("A1", "x").with_merge("A1"));
        let mut book = Book::new();
        book.add_worksheet(ws);

        let result = WorkbookBuilder::new(book).build();
        assert!(matches!(result, Err(ConvertError::Merge(_))));
    }

    fn recorded_merges(cells: &[CellSpec]) -> Vec<(String, String)> {
        let mut worksheet = Worksheet::new();
        let mut writer = CellWriter::new("S1");
        for cell in cells {
            writer.write(&mut worksheet, cell).unwrap();
        }
        writer
            .merges
            .iter()
            .map(|m| (m.first.to_string(), m.last.to_string()))
            .collect()
    }

    #[test]
    fn test_repeated_merge_is_kept_once() {
        let merges = recorded_merges(&[
            CellSpec::new("A1", "first").with_merge("B2"),
            CellSpec::new("A1", "second").with_merge("B2"),
        ]);
        assert_eq!(merges, vec![("A1".to_string(), "B2".to_string())]);
    }

    #[test]
    fn test_overlapping_merge_replaces_earlier() {
        let merges = recorded_merges(&[
            CellSpec::new("A1", "x").with_merge("B2"),
            CellSpec::new("D1", "z").with_merge("E1"),
            CellSpec::new("B2", "y").with_merge("C3"),
        ]);
        assert_eq!(
            merges,
            vec![
                ("D1".to_string(), "E1".to_string()),
                ("B2".to_string(), "C3".to_string()),
            ]
        );
    }

    #[test]
    fn test_write_inside_merged_area_is_accepted() {
        let merges = recorded_merges(&[
            CellSpec::new("A1", "anchor").with_merge("C1"),
            CellSpec::new("B1", "hidden"),
        ]);
        assert_eq!(merges, vec![("A1".to_string(), "C1".to_string())]);
    }

    #[test]
    fn test_merge_area_overlap() {
        let area = |a: &str, b: &str| MergeArea {
            first: CellRef::parse(a).unwrap(),
            last: CellRef::parse(b).unwrap(),
        };
        assert!(area("A1", "B2").overlaps(&area("B2", "C3")));
        assert!(area("A1", "C3").overlaps(&area("B2", "B2")));
        assert!(!area("A1", "B2").overlaps(&area("C1", "D2")));
        assert!(!area("A1", "B2").overlaps(&area("A3", "B4")));
    }

    #[test]
    fn test_empty_book_builds() {
        let result = WorkbookBuilder::new(Book::new()).build_to_buffer();
        assert!(result.is_ok());
    }
}
