/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels scaled to 0.0..=1.0
    pub fn to_unit(self) -> [f32; 3] {
        [self.r, self.g, self.b].map(|c| c as f32 / 255.0)
    }
}

/// Colors used for building bodies and their outlines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Material {
    pub fill: Color,
    pub edge: Color,
    pub background: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            fill: Color::rgb(0x43, 0x3f, 0x81),
            edge: Color::rgb(0xff, 0xff, 0xff),
            background: Color::rgb(0, 0, 0),
        }
    }
}
