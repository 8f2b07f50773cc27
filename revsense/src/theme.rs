//! Color theme system for revsense.
//!
//! A `Theme` holds named `ratatui::style::Color` fields for every surface the
//! workbench draws. Two built-in themes are provided:
//!
//! - `dark`: ANSI 16 colors, safe on any terminal.
//! - `catppuccin_mocha`: Catppuccin Mocha palette in RGB; requires truecolor.

use ratatui::style::Color;

use revsense_core::types::SentimentKind;

#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the focused panel and overlays.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Text
    pub text: Color,
    /// Placeholders, hints and secondary labels.
    pub muted: Color,
    /// Header title and panel headings.
    pub accent: Color,

    // Sentiment badges
    pub sentiment_positive: Color,
    pub sentiment_negative: Color,
    pub sentiment_neutral: Color,
    pub sentiment_other: Color,

    // Action hints
    /// Key hint for an action that is currently available.
    pub action_enabled: Color,
    /// Key hint for an action that is disabled or in flight.
    pub action_disabled: Color,
    /// Success banners (copied, ticket created).
    pub success: Color,
    /// Last failure message in the status bar.
    pub error: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    /// Mode indicator color when browsing.
    pub status_mode_normal: Color,
    /// Mode indicator color while editing text.
    pub status_mode_insert: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            text: Color::Reset,
            muted: Color::DarkGray,
            accent: Color::Magenta,

            sentiment_positive: Color::Green,
            sentiment_negative: Color::Red,
            sentiment_neutral: Color::Yellow,
            sentiment_other: Color::Gray,

            action_enabled: Color::Cyan,
            action_disabled: Color::DarkGray,
            success: Color::Green,
            error: Color::Red,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_insert: Color::Green,
        }
    }

    /// Catppuccin Mocha, <https://github.com/catppuccin/catppuccin>.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7
        let sapphire = Color::Rgb(116, 199, 236); // #74c7ec
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let subtext0 = Color::Rgb(166, 173, 200); // #a6adc8
        let text = Color::Rgb(205, 214, 244); // #cdd6f4

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            text,
            muted: overlay1,
            accent: mauve,

            sentiment_positive: green,
            sentiment_negative: red,
            sentiment_neutral: yellow,
            sentiment_other: subtext0,

            action_enabled: sapphire,
            action_disabled: surface1,
            success: green,
            error: red,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_insert: green,
        }
    }

    /// Resolves a theme name from config. Unknown names fall back to `dark`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }

    pub fn sentiment(&self, kind: SentimentKind) -> Color {
        match kind {
            SentimentKind::Positive => self.sentiment_positive,
            SentimentKind::Negative => self.sentiment_negative,
            SentimentKind::Neutral => self.sentiment_neutral,
            SentimentKind::Other => self.sentiment_other,
        }
    }
}
