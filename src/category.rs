//! Defect categories and their display colors.

use serde::{Deserialize, Serialize};

/// An opaque sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Color used for any category missing from [`CATEGORIES`].
pub const NEUTRAL_GRAY: Rgb = Rgb::new(0x6b, 0x72, 0x80);

/// A defect type that shapes can be labelled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefectCategory {
    pub id: &'static str,
    pub label: &'static str,
    pub color: Rgb,
}

pub const CATEGORIES: &[DefectCategory] = &[
    DefectCategory {
        id: "burnt",
        label: "Burnt Area",
        color: Rgb::new(0xef, 0x44, 0x44),
    },
    DefectCategory {
        id: "undercooked",
        label: "Undercooked",
        color: Rgb::new(0xf5, 0x9e, 0x0b),
    },
    DefectCategory {
        id: "missing_topping",
        label: "Missing Topping",
        color: Rgb::new(0x8b, 0x5c, 0xf6),
    },
    DefectCategory {
        id: "uneven_cheese",
        label: "Uneven Cheese",
        color: Rgb::new(0x3b, 0x82, 0xf6),
    },
    DefectCategory {
        id: "bubble_defect",
        label: "Bubble Defect",
        color: Rgb::new(0x6b, 0x72, 0x80),
    },
];

/// The category selected when the surface starts.
pub const DEFAULT_CATEGORY: &str = "burnt";

pub fn find(id: &str) -> Option<&'static DefectCategory> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Display color for a category id; unknown ids get [`NEUTRAL_GRAY`].
pub fn color_for(id: &str) -> Rgb {
    find(id).map(|c| c.color).unwrap_or(NEUTRAL_GRAY)
}

/// Human-readable label; unknown ids are shown as-is.
pub fn label_for(id: &str) -> &str {
    match find(id) {
        Some(c) => c.label,
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_colors() {
        assert_eq!(color_for("burnt").to_hex(), "#ef4444");
        assert_eq!(color_for("undercooked").to_hex(), "#f59e0b");
        assert_eq!(color_for("missing_topping").to_hex(), "#8b5cf6");
        assert_eq!(color_for("uneven_cheese").to_hex(), "#3b82f6");
        assert_eq!(color_for("bubble_defect").to_hex(), "#6b7280");
    }

    #[test]
    fn test_unknown_category_is_gray() {
        assert_eq!(color_for("raw_crust"), NEUTRAL_GRAY);
        assert_eq!(color_for(""), NEUTRAL_GRAY);
        // Lookup is exact, not case-folded.
        assert_eq!(color_for("Burnt"), NEUTRAL_GRAY);
    }

    #[test]
    fn test_labels() {
        assert_eq!(label_for("missing_topping"), "Missing Topping");
        assert_eq!(label_for("raw_crust"), "raw_crust");
    }

    #[test]
    fn test_default_category_exists() {
        assert!(find(DEFAULT_CATEGORY).is_some());
    }
}
