//! Color theme and glyphs for the slurp TUI.
//!
//! Kanagawa Wave palette; glyphs have an ASCII-only fallback for terminals
//! without decent Unicode fonts.

use ratatui::style::{Color, Modifier, Style};

use slurp_types::FileKind;

/// Kanagawa Wave color constants.
mod colors {
    use super::Color;

    pub const BG_DARK: Color = Color::Rgb(22, 22, 29); // sumiInk0
    pub const BG_PANEL: Color = Color::Rgb(31, 31, 40); // sumiInk3
    pub const BG_HIGHLIGHT: Color = Color::Rgb(42, 42, 55); // sumiInk4
    pub const BG_BORDER: Color = Color::Rgb(84, 84, 109); // sumiInk6

    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 215, 186); // fujiWhite
    pub const TEXT_SECONDARY: Color = Color::Rgb(200, 192, 147); // oldWhite
    pub const TEXT_MUTED: Color = Color::Rgb(114, 113, 105); // fujiGray

    pub const PRIMARY: Color = Color::Rgb(149, 127, 184); // oniViolet
    pub const ACCENT: Color = Color::Rgb(127, 180, 202); // springBlue
    pub const SUCCESS: Color = Color::Rgb(152, 187, 108); // springGreen
    pub const WARNING: Color = Color::Rgb(230, 195, 132); // carpYellow
    pub const ERROR: Color = Color::Rgb(255, 93, 98); // peachRed
    pub const PEACH: Color = Color::Rgb(255, 160, 102); // surimiOrange
}

/// Resolved palette used by the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub primary: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub peach: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_highlight: colors::BG_HIGHLIGHT,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_secondary: colors::TEXT_SECONDARY,
            text_muted: colors::TEXT_MUTED,
            primary: colors::PRIMARY,
            accent: colors::ACCENT,
            success: colors::SUCCESS,
            warning: colors::WARNING,
            error: colors::ERROR,
            peach: colors::PEACH,
        }
    }
}

/// Glyph set for listing icons and overlays.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub directory: &'static str,
    pub parent: &'static str,
    pub image: &'static str,
    pub pdf: &'static str,
    pub audio: &'static str,
    pub video: &'static str,
    pub sheet: &'static str,
    pub document: &'static str,
    pub text: &'static str,
    pub other: &'static str,
    pub selected: &'static str,
    pub spinner_frames: &'static [&'static str],
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_FRAMES_ASCII: &[&str] = &["|", "/", "-", "\\"];

impl Glyphs {
    #[must_use]
    pub fn unicode() -> Self {
        Self {
            directory: "▣",
            parent: "↩",
            image: "◍",
            pdf: "▤",
            audio: "♪",
            video: "▶",
            sheet: "▦",
            document: "▧",
            text: "≡",
            other: "·",
            selected: "▸",
            spinner_frames: SPINNER_FRAMES,
        }
    }

    #[must_use]
    pub fn ascii() -> Self {
        Self {
            directory: "/",
            parent: "^",
            image: "i",
            pdf: "p",
            audio: "a",
            video: "v",
            sheet: "s",
            document: "d",
            text: "t",
            other: "-",
            selected: ">",
            spinner_frames: SPINNER_FRAMES_ASCII,
        }
    }

    #[must_use]
    pub fn for_kind(&self, kind: FileKind) -> &'static str {
        match kind {
            FileKind::Image => self.image,
            FileKind::Pdf => self.pdf,
            FileKind::Audio => self.audio,
            FileKind::Video => self.video,
            FileKind::Sheet => self.sheet,
            FileKind::Document => self.document,
            FileKind::Text => self.text,
            FileKind::Other => self.other,
        }
    }

    #[must_use]
    pub fn spinner_frame(&self, tick: usize) -> &'static str {
        self.spinner_frames[tick % self.spinner_frames.len()]
    }
}

/// Palette plus glyphs, resolved once at startup from the config.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub palette: Palette,
    pub glyphs: Glyphs,
}

impl Theme {
    #[must_use]
    pub fn new(ascii_only: bool) -> Self {
        Self {
            palette: Palette::standard(),
            glyphs: if ascii_only {
                Glyphs::ascii()
            } else {
                Glyphs::unicode()
            },
        }
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn selected_row(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .bg(palette.bg_highlight)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn directory_name(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.peach)
            .add_modifier(Modifier::BOLD)
    }
}
