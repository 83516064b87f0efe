//! Theme data model: built-in palettes and resolution from config.
//!
//! The theme system provides two built-in palettes (dark and light) and
//! supports custom color overrides from the config file.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig};

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
///
/// Constructed from a config-level `ThemeConfig` via `resolve_theme()`.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Table body
    pub table_bg: Color,
    pub table_fg: Color,
    pub row_alt_bg: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub folder_fg: Color,
    pub placeholder_fg: Color,

    // Table header
    pub header_bg: Color,
    pub header_fg: Color,

    // Filter bar
    pub filter_fg: Color,

    // Status bar
    pub status_bg: Color,
    pub status_fg: Color,

    // Borders & chrome
    pub border_fg: Color,
    pub border_focused_fg: Color,

    // Semantic colors (not configurable, consistent across themes)
    pub error_fg: Color,
    pub success_fg: Color,
    pub accent_fg: Color,
    pub dim_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        table_bg: Color::Reset,
        table_fg: Color::Rgb(205, 214, 244),       // #cdd6f4 (text)
        row_alt_bg: Color::Rgb(49, 50, 68),        // #313244 (surface0)
        selected_bg: Color::Rgb(88, 91, 112),      // #585b70 (surface2)
        selected_fg: Color::Rgb(205, 214, 244),    // #cdd6f4
        folder_fg: Color::Rgb(137, 180, 250),      // #89b4fa (blue)
        placeholder_fg: Color::Rgb(108, 112, 134), // #6c7086 (overlay0)

        header_bg: Color::Rgb(69, 71, 90),     // #45475a (surface1)
        header_fg: Color::Rgb(249, 226, 175),  // #f9e2af (yellow)

        filter_fg: Color::Rgb(205, 214, 244),

        status_bg: Color::Rgb(30, 30, 46), // #1e1e2e (base)
        status_fg: Color::Rgb(205, 214, 244),

        border_fg: Color::Rgb(88, 91, 112),           // #585b70 (surface2)
        border_focused_fg: Color::Rgb(137, 180, 250), // #89b4fa (blue)

        error_fg: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
        success_fg: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
        accent_fg: Color::Rgb(203, 166, 247),  // #cba6f7 (mauve)
        dim_fg: Color::Rgb(108, 112, 134),     // #6c7086
    }
}

/// Light theme, complementary light palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        table_bg: Color::Reset,
        table_fg: Color::Rgb(76, 79, 105),         // #4c4f69 (text)
        row_alt_bg: Color::Rgb(230, 233, 239),     // #e6e9ef (mantle)
        selected_bg: Color::Rgb(204, 208, 218),    // #ccd0da (surface0)
        selected_fg: Color::Rgb(76, 79, 105),
        folder_fg: Color::Rgb(30, 102, 245),       // #1e66f5 (blue)
        placeholder_fg: Color::Rgb(156, 160, 176), // #9ca0b0 (overlay0)

        header_bg: Color::Rgb(188, 192, 204), // #bcc0cc (surface1)
        header_fg: Color::Rgb(76, 79, 105),

        filter_fg: Color::Rgb(76, 79, 105),

        status_bg: Color::Rgb(239, 241, 245), // #eff1f5 (base)
        status_fg: Color::Rgb(76, 79, 105),

        border_fg: Color::Rgb(172, 176, 190), // #acb0be (surface2)
        border_focused_fg: Color::Rgb(30, 102, 245),

        error_fg: Color::Rgb(210, 15, 57),   // #d20f39 (red)
        success_fg: Color::Rgb(64, 160, 43), // #40a02b (green)
        accent_fg: Color::Rgb(136, 57, 239), // #8839ef (mauve)
        dim_fg: Color::Rgb(156, 160, 176),
    }
}

// ── Color parsing ────────────────────────────────────────────────────────────

/// Parse a hex color string like `"#aabbcc"` into a `ratatui::style::Color`.
/// Returns `None` for malformed input.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Overwrite `slot` when `hex` is present and parses.
fn override_color(slot: &mut Color, hex: Option<&str>) {
    if let Some(color) = hex.and_then(parse_hex_color) {
        *slot = color;
    }
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config.
///
/// - `"dark"` (default): dark Catppuccin palette
/// - `"light"`: light Catppuccin palette
/// - `"custom"`: start from dark palette, then override with custom hex values
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    let scheme = config.scheme.as_deref().unwrap_or("dark");
    match scheme {
        "light" => light_theme(),
        "custom" => {
            let mut theme = dark_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        _ => dark_theme(),
    }
}

/// Apply custom hex color overrides on top of an existing theme.
fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    override_color(&mut theme.table_bg, custom.table_bg.as_deref());
    override_color(&mut theme.table_fg, custom.table_fg.as_deref());
    override_color(&mut theme.header_bg, custom.header_bg.as_deref());
    override_color(&mut theme.header_fg, custom.header_fg.as_deref());
    override_color(&mut theme.row_alt_bg, custom.row_alt_bg.as_deref());
    override_color(&mut theme.selected_bg, custom.selected_bg.as_deref());
    override_color(&mut theme.selected_fg, custom.selected_fg.as_deref());
    override_color(&mut theme.folder_fg, custom.folder_fg.as_deref());
    override_color(&mut theme.placeholder_fg, custom.placeholder_fg.as_deref());
    override_color(&mut theme.filter_fg, custom.filter_fg.as_deref());
    override_color(&mut theme.status_bg, custom.status_bg.as_deref());
    override_color(&mut theme.status_fg, custom.status_fg.as_deref());
    override_color(&mut theme.border_fg, custom.border_fg.as_deref());
    override_color(
        &mut theme.border_focused_fg,
        custom.border_focused_fg.as_deref(),
    );
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_valid() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("#1a1b26"), Some(Color::Rgb(26, 27, 38)));
        assert_eq!(parse_hex_color("00ff00"), Some(Color::Rgb(0, 255, 0)));
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color(""), None);
        assert_eq!(parse_hex_color("#"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_resolve_light_theme() {
        let config = ThemeConfig {
            scheme: Some("light".to_string()),
            custom: None,
        };
        assert_eq!(resolve_theme(&config).folder_fg, Color::Rgb(30, 102, 245));
    }

    #[test]
    fn test_resolve_default_is_dark() {
        let theme = resolve_theme(&ThemeConfig::default());
        assert_eq!(theme.folder_fg, Color::Rgb(137, 180, 250));
    }

    #[test]
    fn test_resolve_custom_overrides() {
        let config = ThemeConfig {
            scheme: Some("custom".to_string()),
            custom: Some(ThemeColorsConfig {
                header_bg: Some("#1a1b26".to_string()),
                row_alt_bg: Some("#c0caf5".to_string()),
                ..Default::default()
            }),
        };
        let theme = resolve_theme(&config);
        assert_eq!(theme.header_bg, Color::Rgb(26, 27, 38));
        assert_eq!(theme.row_alt_bg, Color::Rgb(192, 202, 245));
        // Non-custom values fall back to dark theme
        assert_eq!(theme.folder_fg, Color::Rgb(137, 180, 250));
    }

    #[test]
    fn test_custom_with_invalid_hex_falls_back() {
        let config = ThemeConfig {
            scheme: Some("custom".to_string()),
            custom: Some(ThemeColorsConfig {
                table_bg: Some("#zzzzzz".to_string()),
                ..Default::default()
            }),
        };
        assert_eq!(resolve_theme(&config).table_bg, Color::Reset);
    }

    #[test]
    fn test_unknown_scheme_falls_back_to_dark() {
        let config = ThemeConfig {
            scheme: Some("neon".to_string()),
            custom: None,
        };
        assert_eq!(resolve_theme(&config).folder_fg, Color::Rgb(137, 180, 250));
    }

    #[test]
    fn test_dark_and_light_different() {
        let dark = dark_theme();
        let light = light_theme();
        assert_ne!(dark.table_fg, light.table_fg);
        assert_ne!(dark.row_alt_bg, light.row_alt_bg);
        assert_ne!(dark.header_bg, light.header_bg);
    }
}
