//! json2xlsx - build .xlsx workbooks from JSON documents
//!
//! A document lists worksheets, and for each one its column widths, row
//! heights and cells. Cells carry a value, an optional merge target and an
//! optional style (borders, fill, font, alignment, protection, number format).
//! The builder replays the document in order against `rust_xlsxwriter` and
//! stops at the first error.
//!
//! # Example
//!
//! ```no_run
//! use json2xlsx::excel::WorkbookBuilder;
//! use json2xlsx::parser::parse_book;
//! use std::path::Path;
//!
//! let book = parse_book(Path::new("report.json"))?;
//! println!("Worksheets: {}", book.worksheets.len());
//!
//! WorkbookBuilder::new(book).build_to_file(Path::new("report.xlsx"))?;
//! # Ok::<(), json2xlsx::error::ConvertError>(())
//! ```

pub mod cli;
pub mod error;
pub mod excel;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use error::{ConvertError, ConvertResult};
pub use types::{Book, CellSpec, CellValue, ColumnSpec, RowSpec, Style, WorksheetSpec};
