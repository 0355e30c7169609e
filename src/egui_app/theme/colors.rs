//! Color Constants
//!
//! Light feed on a warm neutral background, dark top bar, brown accents.

use eframe::egui::Color32;

/// Main content background - Off-white
pub const BG_MAIN: Color32 = Color32::from_rgb(0xF7, 0xF2, 0xEC);

/// Post card background - White
pub const CARD_BG: Color32 = Color32::from_rgb(0xFF, 0xFF, 0xFF);

/// Post card border - Muted tan
pub const CARD_BORDER: Color32 = Color32::from_rgb(0xDD, 0xCF, 0xC0);

/// Top bar background - Dark brown
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x3E, 0x2A, 0x24);

/// Toast background - Deep brown
pub const TOAST_BG: Color32 = Color32::from_rgb(0x2F, 0x1E, 0x1A);

/// Chat list background - Light tan
pub const CHAT_LIST_BG: Color32 = Color32::from_rgb(0xEA, 0xDB, 0xC8);

/// Message bubble outgoing - Tan
pub const BUBBLE_OUTGOING: Color32 = Color32::from_rgb(0xD8, 0xC0, 0xA8);

/// Message bubble incoming - Light tan
pub const BUBBLE_INCOMING: Color32 = Color32::from_rgb(0xEA, 0xDB, 0xC8);

/// Message bubble border - Muted brown
pub const BUBBLE_BORDER: Color32 = Color32::from_rgb(0xC7, 0xB2, 0x9A);

/// Input background
pub const INPUT_BG: Color32 = Color32::from_rgb(0xFB, 0xF8, 0xF4);

/// Avatar stand-in when a user has no picture
pub const AVATAR_PLACEHOLDER: Color32 = Color32::from_rgb(0xC6, 0xB2, 0x9E);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xF0, 0xE0, 0xD6);

/// Primary text color
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0x2F, 0x1E, 0x1A);

/// Secondary text color (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x8B, 0x7B, 0x6B);

/// Timestamp text color
pub const TIMESTAMP: Color32 = Color32::from_rgb(0x8B, 0x7B, 0x6B);

/// Accent color for primary buttons
pub const ACCENT: Color32 = Color32::from_rgb(0x5C, 0x3A, 0x2C);

/// Accent hover
pub const ACCENT_HOVER: Color32 = Color32::from_rgb(0x6D, 0x4B, 0x3D);

/// Like heart
pub const LIKE: Color32 = Color32::from_rgb(0xE0, 0x3E, 0x52);

pub const SUCCESS: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

pub const ERROR: Color32 = Color32::from_rgb(0xE5, 0x73, 0x73);

/// Separator/divider color
pub const SEPARATOR: Color32 = Color32::from_rgb(0xD0, 0xC0, 0xB0);
