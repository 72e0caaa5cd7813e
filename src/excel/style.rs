//! Translation of document styles into `rust_xlsxwriter` formats

use super::color::{indexed_color, parse_hex_color, theme_color};
use super::number_format::{resolve_number_format, NumberFormat};
use crate::error::{ConvertError, ConvertResult};
use crate::types::{Alignment, Border, Fill, Font, Protection, Style};
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, FormatDiagonalBorder, FormatPattern, FormatScript,
    FormatUnderline,
};
use tracing::{debug, warn};

/// Longest font family name Excel accepts
const MAX_FONT_NAME_LEN: usize = 31;
/// Largest font size in points
const MAX_FONT_SIZE: f64 = 409.0;
/// Largest indent level
const MAX_INDENT: u32 = 250;

/// Build the cell format for a style. Parts the style leaves out stay at
/// the `Format::new()` defaults.
pub fn build_format(style: &Style) -> ConvertResult<Format> {
    translate(style).map_err(ConvertError::Style)
}

fn translate(style: &Style) -> Result<Format, String> {
    let mut f = Format::new();

    f = apply_borders(f, &style.borders)?;
    if let Some(fill) = &style.fill {
        f = apply_fill(f, fill)?;
    }
    if let Some(font) = &style.font {
        f = apply_font(f, font)?;
    }
    if let Some(alignment) = &style.alignment {
        f = apply_alignment(f, alignment)?;
    }
    if let Some(protection) = &style.protection {
        f = apply_protection(f, protection);
    }

    match resolve_number_format(
        style.num_fmt,
        style.decimal_places,
        style.custom_num_fmt.as_deref(),
    )? {
        Some(NumberFormat::Builtin(id)) => f = f.set_num_format_index(id),
        Some(NumberFormat::Custom(code)) => f = f.set_num_format(code),
        None => {}
    }

    Ok(f)
}

// ---------------------------------------------------------------------------
// Borders
// ---------------------------------------------------------------------------

fn border_style(code: u32) -> Result<FormatBorder, String> {
    Ok(match code {
        0 => FormatBorder::None,
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        8 => FormatBorder::MediumDashed,
        9 => FormatBorder::DashDot,
        10 => FormatBorder::MediumDashDot,
        11 => FormatBorder::DashDotDot,
        12 => FormatBorder::MediumDashDotDot,
        13 => FormatBorder::SlantDashDot,
        _ => return Err(format!("border style {} is out of range (0-13)", code)),
    })
}

fn apply_borders(mut f: Format, borders: &[Border]) -> Result<Format, String> {
    let mut diagonal_up = false;
    let mut diagonal_down = false;

    for border in borders {
        let line = border_style(border.style)?;
        let color = border
            .color
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(parse_hex_color)
            .transpose()?;

        f = match border.side.to_ascii_lowercase().as_str() {
            "left" => f.set_border_left(line),
            "right" => f.set_border_right(line),
            "top" => f.set_border_top(line),
            "bottom" => f.set_border_bottom(line),
            "diagonalup" => {
                diagonal_up = true;
                f.set_border_diagonal(line)
            }
            "diagonaldown" => {
                diagonal_down = true;
                f.set_border_diagonal(line)
            }
            other => return Err(format!("unknown border side '{}'", other)),
        };

        if let Some(color) = color {
            f = match border.side.to_ascii_lowercase().as_str() {
                "left" => f.set_border_left_color(color),
                "right" => f.set_border_right_color(color),
                "top" => f.set_border_top_color(color),
                "bottom" => f.set_border_bottom_color(color),
                _ => f.set_border_diagonal_color(color),
            };
        }
    }

    // Both diagonals share one line style; the last one listed wins
    match (diagonal_up, diagonal_down) {
        (true, true) => f = f.set_border_diagonal_type(FormatDiagonalBorder::BorderUpDown),
        (true, false) => f = f.set_border_diagonal_type(FormatDiagonalBorder::BorderUp),
        (false, true) => f = f.set_border_diagonal_type(FormatDiagonalBorder::BorderDown),
        (false, false) => {}
    }

    Ok(f)
}

// ---------------------------------------------------------------------------
// Fill
// ---------------------------------------------------------------------------

fn fill_pattern(code: u32) -> Result<FormatPattern, String> {
    Ok(match code {
        0 => FormatPattern::None,
        1 => FormatPattern::Solid,
        2 => FormatPattern::MediumGray,
        3 => FormatPattern::DarkGray,
        4 => FormatPattern::LightGray,
        5 => FormatPattern::DarkHorizontal,
        6 => FormatPattern::DarkVertical,
        7 => FormatPattern::DarkDown,
        8 => FormatPattern::DarkUp,
        9 => FormatPattern::DarkGrid,
        10 => FormatPattern::DarkTrellis,
        11 => FormatPattern::LightHorizontal,
        12 => FormatPattern::LightVertical,
        13 => FormatPattern::LightDown,
        14 => FormatPattern::LightUp,
        15 => FormatPattern::LightGrid,
        16 => FormatPattern::LightTrellis,
        17 => FormatPattern::Gray125,
        18 => FormatPattern::Gray0625,
        _ => return Err(format!("fill pattern {} is out of range (0-18)", code)),
    })
}

fn apply_fill(f: Format, fill: &Fill) -> Result<Format, String> {
    let colors = fill
        .color
        .iter()
        .map(|c| parse_hex_color(c))
        .collect::<Result<Vec<Color>, String>>()?;

    match fill.fill_type.to_ascii_lowercase().as_str() {
        "pattern" | "" => apply_pattern(f, fill.pattern, &colors),
        "gradient" => {
            warn!(
                shading = ?fill.shading,
                "gradient fills are not supported, using a solid fill of the first color"
            );
            match colors.first() {
                Some(&color) => Ok(f
                    .set_pattern(FormatPattern::Solid)
                    .set_background_color(color)),
                None => Ok(f),
            }
        }
        other => Err(format!("unknown fill type '{}'", other)),
    }
}

fn apply_pattern(f: Format, code: u32, colors: &[Color]) -> Result<Format, String> {
    let pattern = fill_pattern(code)?;
    if pattern == FormatPattern::None {
        return Ok(f);
    }

    let mut f = f.set_pattern(pattern);
    if pattern == FormatPattern::Solid {
        if let Some(&color) = colors.first() {
            f = f.set_background_color(color);
        }
        return Ok(f);
    }

    if let Some(&fg) = colors.first() {
        f = f.set_foreground_color(fg);
    }
    if let Some(&bg) = colors.get(1) {
        f = f.set_background_color(bg);
    }
    Ok(f)
}

// ---------------------------------------------------------------------------
// Font
// ---------------------------------------------------------------------------

fn underline_style(name: &str) -> Result<Option<FormatUnderline>, String> {
    Ok(match name.to_ascii_lowercase().as_str() {
        "" | "none" => None,
        "single" => Some(FormatUnderline::Single),
        "double" => Some(FormatUnderline::Double),
        "singleaccounting" => Some(FormatUnderline::SingleAccounting),
        "doubleaccounting" => Some(FormatUnderline::DoubleAccounting),
        other => return Err(format!("unknown underline style '{}'", other)),
    })
}

fn font_color(font: &Font) -> Result<Option<Color>, String> {
    if let Some(theme) = font.color_theme {
        return theme_color(theme, font.color_tint.unwrap_or(0.0)).map(Some);
    }
    if font.color_tint.is_some_and(|t| t != 0.0) {
        debug!("color_tint only applies to theme colors; ignored");
    }
    if let Some(hex) = font.color.as_deref().filter(|c| !c.is_empty()) {
        return parse_hex_color(hex).map(Some);
    }
    font.color_indexed.map(indexed_color).transpose()
}

fn apply_font(mut f: Format, font: &Font) -> Result<Format, String> {
    if font.bold == Some(true) {
        f = f.set_bold();
    }
    if font.italic == Some(true) {
        f = f.set_italic();
    }
    if font.strike == Some(true) {
        f = f.set_font_strikethrough();
    }
    if let Some(underline) = font.underline.as_deref() {
        if let Some(style) = underline_style(underline)? {
            f = f.set_underline(style);
        }
    }
    if let Some(family) = font.family.as_deref().filter(|name| !name.is_empty()) {
        if family.chars().count() > MAX_FONT_NAME_LEN {
            return Err(format!(
                "font family '{}' is longer than {} characters",
                family, MAX_FONT_NAME_LEN
            ));
        }
        f = f.set_font_name(family);
    }
    if let Some(size) = font.size {
        if !size.is_finite() || size <= 0.0 || size > MAX_FONT_SIZE {
            return Err(format!(
                "font size {} must be above 0 and at most {}",
                size, MAX_FONT_SIZE
            ));
        }
        f = f.set_font_size(size);
    }
    if let Some(color) = font_color(font)? {
        f = f.set_font_color(color);
    }
    if let Some(script) = font.vert_align.as_deref() {
        f = match script.to_ascii_lowercase().as_str() {
            "" | "baseline" => f,
            "superscript" => f.set_font_script(FormatScript::Superscript),
            "subscript" => f.set_font_script(FormatScript::Subscript),
            other => return Err(format!("unknown vertical alignment '{}'", other)),
        };
    }
    Ok(f)
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

fn horizontal_align(name: &str) -> Result<Option<FormatAlign>, String> {
    Ok(match name.to_ascii_lowercase().as_str() {
        "" => None,
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "fill" => Some(FormatAlign::Fill),
        "justify" => Some(FormatAlign::Justify),
        "centercontinuous" => Some(FormatAlign::CenterAcross),
        "distributed" => Some(FormatAlign::Distributed),
        other => return Err(format!("unknown horizontal alignment '{}'", other)),
    })
}

fn vertical_align(name: &str) -> Result<Option<FormatAlign>, String> {
    Ok(match name.to_ascii_lowercase().as_str() {
        "" => None,
        "top" => Some(FormatAlign::Top),
        "center" => Some(FormatAlign::VerticalCenter),
        "bottom" => Some(FormatAlign::Bottom),
        "justify" => Some(FormatAlign::VerticalJustify),
        "distributed" => Some(FormatAlign::VerticalDistributed),
        other => return Err(format!("unknown vertical alignment '{}'", other)),
    })
}

/// Map a text rotation to the writer's angle.
/// 91-180 is Excel's encoding of -1 to -90 degrees; 255 is stacked text.
fn rotation_angle(rotation: i32) -> Result<i16, String> {
    match rotation {
        -90..=90 => Ok(rotation as i16),
        91..=180 => Ok((90 - rotation) as i16),
        255 => Ok(270),
        _ => Err(format!("text rotation {} is out of range", rotation)),
    }
}

fn apply_alignment(mut f: Format, alignment: &Alignment) -> Result<Format, String> {
    if let Some(align) = alignment.horizontal.as_deref() {
        if let Some(align) = horizontal_align(align)? {
            f = f.set_align(align);
        }
    }
    if let Some(align) = alignment.vertical.as_deref() {
        if let Some(align) = vertical_align(align)? {
            f = f.set_align(align);
        }
    }
    if let Some(indent) = alignment.indent.filter(|&i| i > 0) {
        if indent > MAX_INDENT {
            return Err(format!("indent {} exceeds {}", indent, MAX_INDENT));
        }
        f = f.set_indent(indent as u8);
    }
    if let Some(rotation) = alignment.text_rotation.filter(|&r| r != 0) {
        f = f.set_rotation(rotation_angle(rotation)?);
    }
    if let Some(order) = alignment.reading_order.filter(|&o| o > 0) {
        if order > 2 {
            return Err(format!("reading order {} is out of range (0-2)", order));
        }
        f = f.set_reading_direction(order as u8);
    }
    if alignment.wrap_text == Some(true) {
        f = f.set_text_wrap();
    }
    if alignment.shrink_to_fit == Some(true) {
        f = f.set_shrink();
    }
    if alignment.justify_last_line == Some(true) {
        debug!("justify_last_line is not supported by the xlsx writer; ignored");
    }
    if alignment.relative_indent.is_some_and(|i| i != 0) {
        debug!("relative_indent is not supported by the xlsx writer; ignored");
    }
    Ok(f)
}

// ---------------------------------------------------------------------------
// Protection
// ---------------------------------------------------------------------------

fn apply_protection(mut f: Format, protection: &Protection) -> Format {
    if protection.hidden == Some(true) {
        f = f.set_hidden();
    }
    if protection.locked == Some(false) {
        f = f.set_unlocked();
    }
    f
}
