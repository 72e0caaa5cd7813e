//! Excel workbook generation
//!
//! Turns a parsed `Book` into an .xlsx file:
//! - `builder`: sheet, dimension, cell and merge replay
//! - `style`: document styles → `rust_xlsxwriter::Format`
//! - `address`, `color`, `number_format`: reference, color and number-format helpers

pub mod address;
mod builder;
pub mod color;
pub mod number_format;
mod style;

pub use address::CellRef;
pub use builder::{WorkbookBuilder, MAX_COLUMN_WIDTH, MAX_ROW_HEIGHT};
pub use style::build_format;
