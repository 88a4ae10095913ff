use clap::ValueEnum;
use crossterm::style::Color;

/// Named themes selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
    HighContrast,
}

impl ThemeName {
    pub fn next(self) -> Self {
        match self {
            ThemeName::Dark => ThemeName::Light,
            ThemeName::Light => ThemeName::HighContrast,
            ThemeName::HighContrast => ThemeName::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeName::Dark => "Dark",
            ThemeName::Light => "Light",
            ThemeName::HighContrast => "High contrast",
        }
    }
}

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Blocked square fill
    pub blocked: Color,
    /// Empty letter square background
    pub cell_bg: Color,
    /// Typed letter color
    pub letter: Color,
    /// Clue number color
    pub number: Color,
    /// Selected cell background
    pub selected_bg: Color,
    /// Cells of the active word
    pub word_bg: Color,
    /// Incorrect letter after a check
    pub error: Color,
    /// Correct letter after a check, completed clues
    pub success: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
            ThemeName::HighContrast => Self::high_contrast(),
        }
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            name: ThemeName::Dark,
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 70, g: 75, b: 90 },
            blocked: Color::Rgb { r: 45, g: 48, b: 60 },
            cell_bg: Color::Rgb { r: 32, g: 35, b: 46 },
            letter: Color::Rgb { r: 80, g: 180, b: 255 },
            number: Color::Rgb { r: 140, g: 150, b: 180 },
            selected_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            word_bg: Color::Rgb { r: 45, g: 55, b: 80 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    pub fn light() -> Self {
        Self {
            name: ThemeName::Light,
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 180, g: 180, b: 195 },
            blocked: Color::Rgb { r: 60, g: 60, b: 80 },
            cell_bg: Color::Rgb { r: 255, g: 255, b: 255 },
            letter: Color::Rgb { r: 30, g: 100, b: 200 },
            number: Color::Rgb { r: 110, g: 110, b: 130 },
            selected_bg: Color::Rgb { r: 180, g: 200, b: 255 },
            word_bg: Color::Rgb { r: 220, g: 228, b: 250 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            name: ThemeName::HighContrast,
            bg: Color::Black,
            fg: Color::White,
            border: Color::Grey,
            blocked: Color::DarkGrey,
            cell_bg: Color::Black,
            letter: Color::Cyan,
            number: Color::Yellow,
            selected_bg: Color::Blue,
            word_bg: Color::Rgb { r: 30, g: 30, b: 70 },
            error: Color::Red,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }
}
