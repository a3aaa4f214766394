use ratatui::style::Color;

// Primary brand colors
pub const ACCENT: Color = Color::Rgb(88, 166, 218); // cold console blue
pub const ACCENT_DIM: Color = Color::Rgb(58, 116, 158);
pub const SUCCESS: Color = Color::Rgb(134, 188, 111); // soft green
pub const WARNING: Color = Color::Rgb(229, 192, 123); // warm amber
pub const ERROR: Color = Color::Rgb(224, 96, 86); // alarm red

// Text colors
pub const TEXT: Color = Color::Rgb(240, 240, 240);
pub const TEXT_SECONDARY: Color = Color::Rgb(180, 180, 180);
pub const TEXT_MUTED: Color = Color::Rgb(144, 144, 144);

// Background colors
pub const BG_BASE: Color = Color::Rgb(22, 24, 28);
pub const BG_SURFACE: Color = Color::Rgb(34, 37, 43);
pub const BG_ELEVATED: Color = Color::Rgb(50, 54, 62);
pub const BG_INPUT: Color = Color::Rgb(40, 43, 50);

// Border colors
pub const BORDER: Color = Color::Rgb(58, 62, 70);
pub const BORDER_FOCUS: Color = ACCENT;

// Role-specific colors
pub const USER: Color = WARNING;
pub const MODEL: Color = ACCENT;
