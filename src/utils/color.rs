use eframe::egui::Color32;

use crate::classify::Tier;

pub trait ColorExt {
    fn from_hex(hex: &str) -> Option<Self>
    where
        Self: Sized;
}

impl ColorExt for Color32 {
    fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let rgb = u32::from_str_radix(digits, 16).ok()?;
        let [_, r, g, b] = rgb.to_be_bytes();
        Some(Color32::from_rgb(r, g, b))
    }
}

/// Background and accent colors for a result tier.
pub fn tier_colors(tier: Tier) -> (Color32, Color32) {
    let background = Color32::from_hex(tier.background_hex()).unwrap_or(Color32::LIGHT_GRAY);
    let accent = Color32::from_hex(tier.accent_hex()).unwrap_or(Color32::DARK_GRAY);
    (background, accent)
}
