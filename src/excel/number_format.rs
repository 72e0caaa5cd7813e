//! Built-in number formats and decimal-place rewriting

/// Locale-independent built-in number formats (ids 0-22 and 37-49)
const BUILTIN_FORMATS: &[(u32, &str)] = &[
    (0, "General"),
    (1, "0"),
    (2, "0.00"),
    (3, "#,##0"),
    (4, "#,##0.00"),
    (5, "($#,##0_);($#,##0)"),
    (6, "($#,##0_);[Red]($#,##0)"),
    (7, "($#,##0.00_);($#,##0.00)"),
    (8, "($#,##0.00_);[Red]($#,##0.00)"),
    (9, "0%"),
    (10, "0.00%"),
    (11, "0.00E+00"),
    (12, "# ?/?"),
    (13, "# ??/??"),
    (14, "m/d/yy"),
    (15, "d-mmm-yy"),
    (16, "d-mmm"),
    (17, "mmm-yy"),
    (18, "h:mm AM/PM"),
    (19, "h:mm:ss AM/PM"),
    (20, "h:mm"),
    (21, "h:mm:ss"),
    (22, "m/d/yy h:mm"),
    (37, "(#,##0_);(#,##0)"),
    (38, "(#,##0_);[Red](#,##0)"),
    (39, "(#,##0.00_);(#,##0.00)"),
    (40, "(#,##0.00_);[Red](#,##0.00)"),
    (41, r#"_(* #,##0_);_(* \(#,##0\);_(* "-"_);_(@_)"#),
    (42, r#"_($* #,##0_);_($* \(#,##0\);_($* "-"_);_(@_)"#),
    (43, r#"_(* #,##0.00_);_(* \(#,##0.00\);_(* "-"??_);_(@_)"#),
    (44, r#"_($* #,##0.00_);_($* \(#,##0.00\);_($* "-"??_);_(@_)"#),
    (45, "mm:ss"),
    (46, "[h]:mm:ss"),
    (47, "mm:ss.0"),
    (48, "##0.0E+0"),
    (49, "@"),
];

/// Upper bound accepted for `decimal_places`
pub const MAX_DECIMAL_PLACES: u32 = 30;

/// Format code for a built-in id, if it is one the writer can reference
pub fn builtin_format_code(id: u32) -> Option<&'static str> {
    BUILTIN_FORMATS
        .iter()
        .find(|(fmt_id, _)| *fmt_id == id)
        .map(|(_, code)| *code)
}

/// Number format chosen for a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberFormat {
    /// Reference a built-in by id
    Builtin(u8),
    /// Explicit format code
    Custom(String),
}

/// Decide the number format from the style's three number-format fields.
///
/// A non-empty custom code wins. Otherwise the built-in id is used, with its two
/// fractional digits replaced when `decimal_places` asks for another count.
pub fn resolve_number_format(
    num_fmt: Option<u32>,
    decimal_places: Option<u32>,
    custom: Option<&str>,
) -> Result<Option<NumberFormat>, String> {
    if let Some(code) = custom.filter(|c| !c.is_empty()) {
        return Ok(Some(NumberFormat::Custom(code.to_string())));
    }

    let Some(id) = num_fmt else {
        return Ok(None);
    };
    let code = builtin_format_code(id)
        .ok_or_else(|| format!("number format {} is not a supported built-in", id))?;

    match decimal_places {
        Some(places) if places > MAX_DECIMAL_PLACES => Err(format!(
            "decimal places {} exceeds {}",
            places, MAX_DECIMAL_PLACES
        )),
        Some(places) if places != 2 && code.contains("0.00") => {
            Ok(Some(NumberFormat::Custom(with_decimal_places(code, places))))
        }
        _ => Ok(Some(NumberFormat::Builtin(id as u8))),
    }
}

/// Replace every `0.00` in a format code with the requested precision
fn with_decimal_places(code: &str, places: u32) -> String {
    let replacement = if places == 0 {
        "0".to_string()
    } else {
        format!("0.{}", "0".repeat(places as usize))
    };
    code.replace("0.00", &replacement)
}
