/// 8-bit RGB color, independent of any GUI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub fn to_hex_string(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Category → circle/legend color. Order is the legend order.
pub const CATEGORY_COLORS: [(&str, Rgb); 10] = [
    ("Surface-to-Air", Rgb::from_hex(0xff0000)),
    ("Ballistic Missile Defence", Rgb::from_hex(0xff4500)),
    ("Air-to-Air", Rgb::from_hex(0x0000ff)),
    ("Air-to-Surface", Rgb::from_hex(0x008000)),
    ("Anti-Radiation", Rgb::from_hex(0xffa500)),
    ("Surface-to-Surface", Rgb::from_hex(0x800080)),
    ("Anti-Ship", Rgb::from_hex(0x00ced1)),
    ("Torpedo", Rgb::from_hex(0xffc0cb)),
    ("Anti-Submarine System", Rgb::from_hex(0xffd700)),
    ("SLBM", Rgb::from_hex(0x4b0082)),
];

/// Used for categories missing from [`CATEGORY_COLORS`].
pub const DEFAULT_COLOR: Rgb = Rgb::from_hex(0xcccccc);

pub fn category_color(category: &str) -> Rgb {
    CATEGORY_COLORS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_map_to_table_colors() {
        assert_eq!(category_color("Air-to-Air").to_hex_string(), "#0000ff");
        assert_eq!(category_color("SLBM").to_hex_string(), "#4b0082");
        assert_eq!(category_color("Anti-Submarine System").to_hex_string(), "#ffd700");
    }

    #[test]
    fn unknown_category_uses_default() {
        assert_eq!(category_color("Hypersonic Glide"), DEFAULT_COLOR);
        assert_eq!(category_color("air-to-air"), DEFAULT_COLOR);
    }
}
