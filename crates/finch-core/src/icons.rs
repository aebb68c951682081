//! Semantic icon keys → terminal glyphs.

use std::{collections::HashMap, fmt};

use once_cell::sync::Lazy;

/// Presentation identifier for a category icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconId(&'static str);

impl IconId {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for IconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

static ICONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("shopping-cart", "🛒"),
        ("utensils", "🍴"),
        ("burger", "🍔"),
        ("coffee", "☕"),
        ("gas-pump", "⛽"),
        ("car", "🚗"),
        ("bus", "🚌"),
        ("parking", "🅿"),
        ("film", "🎬"),
        ("ticket", "🎫"),
        ("music", "🎵"),
        ("gamepad", "🎮"),
        ("tshirt", "👕"),
        ("laptop", "💻"),
        ("home", "🏠"),
        ("shopping-bag", "👜"),
        ("pills", "💊"),
        ("stethoscope", "🩺"),
        ("tooth", "🦷"),
        ("heart", "💖"),
        ("bolt", "⚡"),
        ("wifi", "📶"),
        ("phone", "📱"),
        ("dumbbell", "💪"),
        ("basketball", "🏀"),
        ("graduation-cap", "🎓"),
        ("book", "📚"),
        ("shield", "🔰"),
        ("dollar-sign", "💵"),
        ("briefcase", "💼"),
        ("chart-line", "📈"),
        ("gift", "🎁"),
        ("hand-holding-heart", "🤲"),
        ("spa", "💆"),
        ("paw", "🐾"),
        ("plane", "🛫"),
        ("repeat", "🔁"),
        ("question", "❓"),
    ])
});

/// Fixed lookup from a category's `icon_key` to its glyph.
pub struct IconResolver;

impl IconResolver {
    /// Returned for absent or unrecognised keys. There is no other fallback.
    pub const FALLBACK: IconId = IconId("📁");

    pub fn resolve(icon_key: Option<&str>) -> IconId {
        icon_key
            .map(str::trim)
            .and_then(|key| ICONS.get(key).copied())
            .map(IconId)
            .unwrap_or(Self::FALLBACK)
    }

    pub fn is_known(icon_key: &str) -> bool {
        ICONS.contains_key(icon_key.trim())
    }
}
