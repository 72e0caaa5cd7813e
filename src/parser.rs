use crate::error::{ConvertError, ConvertResult};
use crate::types::Book;
use std::path::Path;
use tracing::debug;

/// Read and deserialize a workbook document from a JSON file
pub fn parse_book(path: &Path) -> ConvertResult<Book> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ConvertError::file_access(path, e))?;
    let book = parse_book_str(&content)?;

    debug!(
        path = %path.display(),
        worksheets = book.worksheets.len(),
        cells = book.cell_count(),
        "parsed workbook document"
    );

    Ok(book)
}

/// Deserialize a workbook document from JSON text.
///
/// Absent fields fall back to their defaults; only malformed JSON or a
/// wrongly typed field is an error.
pub fn parse_book_str(content: &str) -> ConvertResult<Book> {
    Ok(serde_json::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    #[test]
    fn test_parse_minimal_document() {
        let book = parse_book_str(
            r#"{"worksheets":[{"sheet":"S1","cells":[{"cell":"A1","value":"hi"}]}]}"#,
        )
        .unwrap();

        assert_eq!(book.worksheets.len(), 1);
        assert_eq!(book.worksheets[0].name, "S1");
        assert_eq!(
            book.worksheets[0].cells[0].value,
            CellValue::Text("hi".to_string())
        );
    }

    #[test]
    fn test_parse_empty_object() {
        let book = parse_book_str("{}").unwrap();
        assert!(book.worksheets.is_empty());
        assert!(book.file_name.is_none());
    }

    #[test]
    fn test_parse_truncated_document() {
        let result = parse_book_str(r#"{"worksheets":[{"sheet":"S1""#);
        assert!(matches!(result, Err(ConvertError::Parse(_))));
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_book(Path::new("does-not-exist.json"));
        assert!(matches!(result, Err(ConvertError::FileAccess { .. })));
    }
}
