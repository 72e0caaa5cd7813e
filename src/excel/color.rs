//! Color resolution: hex strings, the legacy indexed palette and theme colors

use rust_xlsxwriter::Color;

/// Excel's legacy 64-entry indexed palette. Entries 0-7 repeat 8-15.
const INDEXED_PALETTE: [u32; 64] = [
    0x000000, 0xFFFFFF, 0xFF0000, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF, // 0-7
    0x000000, 0xFFFFFF, 0xFF0000, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF, // 8-15
    0x800000, 0x008000, 0x000080, 0x808000, 0x800080, 0x008080, 0xC0C0C0, 0x808080, // 16-23
    0x9999FF, 0x993366, 0xFFFFCC, 0xCCFFFF, 0x660066, 0xFF8080, 0x0066CC, 0xCCCCFF, // 24-31
    0x000080, 0xFF00FF, 0xFFFF00, 0x00FFFF, 0x800080, 0x800000, 0x008080, 0x0000FF, // 32-39
    0x00CCFF, 0xCCFFFF, 0xCCFFCC, 0xFFFF99, 0x99CCFF, 0xFF99CC, 0xCC99FF, 0xFFCC99, // 40-47
    0x3366FF, 0x33CCCC, 0x99CC00, 0xFFCC00, 0xFF9900, 0xFF6600, 0x666699, 0x969696, // 48-55
    0x003366, 0x339966, 0x003300, 0x333300, 0x993300, 0x993366, 0x333399, 0x333333, // 56-63
];

/// Highest theme color index (accent 6)
const MAX_THEME_COLOR: u32 = 9;

/// Parse `#RRGGBB`, `RRGGBB` or `AARRGGBB`. The alpha byte is dropped.
pub fn parse_hex_color(hex: &str) -> Result<Color, String> {
    let s = hex.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("'{}' is not a hex color", hex));
    }

    let rgb = match s.len() {
        6 => s,
        8 => &s[2..],
        _ => return Err(format!("'{}' is not a hex color", hex)),
    };

    u32::from_str_radix(rgb, 16)
        .map(Color::RGB)
        .map_err(|_| format!("'{}' is not a hex color", hex))
}

/// Resolve an index into the legacy palette. 64 and 65 are the system
/// foreground and background colors.
pub fn indexed_color(index: u32) -> Result<Color, String> {
    match index {
        0..=63 => Ok(Color::RGB(INDEXED_PALETTE[index as usize])),
        64 => Ok(Color::Automatic),
        65 => Ok(Color::White),
        _ => Err(format!("indexed color {} is outside the palette (0-65)", index)),
    }
}

/// Resolve a theme color with a tint.
///
/// The writer only knows the five shades Excel offers in its color picker,
/// so the tint snaps to the nearest one for that theme column.
pub fn theme_color(theme: u32, tint: f64) -> Result<Color, String> {
    if theme > MAX_THEME_COLOR {
        return Err(format!(
            "theme color {} is out of range (0-{})",
            theme, MAX_THEME_COLOR
        ));
    }
    if !tint.is_finite() || !(-1.0..=1.0).contains(&tint) {
        return Err(format!("color tint {} must be between -1 and 1", tint));
    }

    let shades: [f64; 6] = match theme {
        0 => [0.0, -0.05, -0.15, -0.25, -0.35, -0.5],
        1 => [0.0, 0.5, 0.35, 0.25, 0.15, 0.05],
        2 => [0.0, -0.1, -0.25, -0.5, -0.75, -0.9],
        _ => [0.0, 0.8, 0.6, 0.4, -0.25, -0.5],
    };

    let shade = shades
        .iter()
        .map(|s| (s - tint).abs())
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(idx, _)| idx)
        .unwrap_or(0);

    Ok(Color::Theme(theme as u8, shade as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000").unwrap(), Color::RGB(0xFF0000));
        assert_eq!(parse_hex_color("00ff00").unwrap(), Color::RGB(0x00FF00));
        assert_eq!(parse_hex_color("FF0000FF").unwrap(), Color::RGB(0x0000FF));
    }

    #[test]
    fn test_parse_hex_color_rejects_garbage() {
        assert!(parse_hex_color("red").is_err());
        assert!(parse_hex_color("#GG0000").is_err());
        assert!(parse_hex_color("").is_err());
        assert!(parse_hex_color("+FFFFF").is_err());
    }

    #[test]
    fn test_parse_hex_color_rejects_non_ascii() {
        // 8 bytes, but the multibyte character straddles the alpha boundary
        assert!(parse_hex_color("a€bcde").is_err());
        assert!(parse_hex_color("#ÿÿÿ").is_err());
    }

    #[test]
    fn test_indexed_color() {
        assert_eq!(indexed_color(10).unwrap(), Color::RGB(0xFF0000));
        assert_eq!(indexed_color(2).unwrap(), indexed_color(10).unwrap());
        assert_eq!(indexed_color(64).unwrap(), Color::Automatic);
        assert!(indexed_color(66).is_err());
    }

    #[test]
    fn test_theme_color_snaps_tint() {
        assert_eq!(theme_color(4, 0.0).unwrap(), Color::Theme(4, 0));
        assert_eq!(theme_color(4, 0.79).unwrap(), Color::Theme(4, 1));
        assert_eq!(theme_color(4, -0.3).unwrap(), Color::Theme(4, 4));
        assert_eq!(theme_color(0, -0.5).unwrap(), Color::Theme(0, 5));
    }

    #[test]
    fn test_theme_color_rejects_out_of_range() {
        assert!(theme_color(10, 0.0).is_err());
        assert!(theme_color(4, 1.5).is_err());
    }
}
