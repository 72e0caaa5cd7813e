use crate::error::{ConvertError, ConvertResult};
use crate::excel::WorkbookBuilder;
use crate::parser;
use crate::types::Book;
use colored::Colorize;
use std::path::PathBuf;

/// Execute the create command: JSON document → .xlsx workbook
pub fn create(input: PathBuf, output: Option<PathBuf>, verbose: bool) -> ConvertResult<()> {
    println!("{}", "📊 json2xlsx - Creating workbook".bold().green());
    println!("   Input:  {}", input.display());

    if verbose {
        println!("{}", "📖 Parsing JSON document...".cyan());
    }

    let book = parser::parse_book(&input)?;
    let output = resolve_output(output, &book)?;
    println!("   Output: {}\n", output.display());

    if verbose {
        println!(
            "   Found {} worksheets, {} cells",
            book.worksheets.len(),
            book.cell_count()
        );
        for sheet in &book.worksheets {
            println!(
                "   📄 {}: {} columns, {} rows, {} cells",
                sheet.name.bright_blue().bold(),
                sheet.columns.len(),
                sheet.rows.len(),
                sheet.cells.len()
            );
        }
        println!();
        println!("{}", "🧱 Building workbook...".cyan());
    }

    let sheet_count = book.worksheets.len();
    WorkbookBuilder::new(book).build_to_file(&output)?;

    println!("{}", "✅ Workbook created!".bold().green());
    println!("   {} worksheet(s) → {}\n", sheet_count, output.display());

    Ok(())
}

/// Pick the output path: the command line wins over the document's `file_name`
pub fn resolve_output(output: Option<PathBuf>, book: &Book) -> ConvertResult<PathBuf> {
    output
        .or_else(|| {
            book.file_name
                .as_deref()
                .filter(|name| !name.is_empty())
                .map(PathBuf::from)
        })
        .ok_or_else(|| {
            ConvertError::Usage(
                "no output path given and the document has no 'file_name'".to_string(),
            )
        })
}
