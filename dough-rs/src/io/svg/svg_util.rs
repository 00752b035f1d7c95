use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entities::N_DEFECT_CLASSES;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    #[serde(default)]
    pub theme: SvgTheme,
    ///Height of the drawn strip as a fraction of its length
    #[serde(default = "default_aspect")]
    pub aspect: f32,
    ///Draw the placements flagged invalid
    #[serde(default = "default_true")]
    pub draw_invalid: bool,
    ///Write the item name inside each placement
    #[serde(default)]
    pub item_labels: bool,
}

fn default_aspect() -> f32 {
    0.05
}

fn default_true() -> bool {
    true
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgTheme::default(),
            aspect: default_aspect(),
            draw_invalid: true,
            item_labels: false,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgTheme {
    pub stroke_width_multiplier: f32,
    pub board_fill: Color,
    pub item_fill: Color,
    pub invalid_item_fill: Color,
    pub defect_fill: [Color; N_DEFECT_CLASSES],
}

impl Default for SvgTheme {
    fn default() -> Self {
        SvgTheme::EARTH_TONES
    }
}

impl SvgTheme {
    pub const EARTH_TONES: SvgTheme = SvgTheme {
        stroke_width_multiplier: 2.0,
        board_fill: Color(0xCC, 0x82, 0x4A),
        item_fill: Color(0xFF, 0xC8, 0x79),
        invalid_item_fill: Color(0x8C, 0x8C, 0x8C),
        defect_fill: [
            Color(0xFF, 0x00, 0x00), // RED
            Color(0x00, 0x00, 0xFF), // BLUE
            Color(0x00, 0x80, 0x00), // GREEN
        ],
    };

    pub const GRAY: SvgTheme = SvgTheme {
        stroke_width_multiplier: 2.5,
        board_fill: Color(0xD3, 0xD3, 0xD3),
        item_fill: Color(0x7A, 0x7A, 0x7A),
        invalid_item_fill: Color(0xFF, 0xFF, 0xFF),
        defect_fill: [
            Color(0x00, 0x00, 0x00),
            Color(0x40, 0x40, 0x40),
            Color(0x80, 0x80, 0x80),
        ],
    };
}

pub fn change_brightness(color: Color, fraction: f32) -> Color {
    let Color(r, g, b) = color;

    let r = (r as f32 * fraction) as u8;
    let g = (g as f32 * fraction) as u8;
    let b = (b as f32 * fraction) as u8;
    Color(r, g, b)
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Color(pub u8, pub u8, pub u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl TryFrom<&str> for Color {
    type Error = anyhow::Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.strip_prefix('#').unwrap_or(s);
        anyhow::ensure!(
            s.len() == 6 && s.is_ascii(),
            "expected a color in the form #RRGGBB, got {s}"
        );
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16);
        Ok(Color(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{self}"))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::try_from(s.as_str()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_parse_and_print() {
        let c = Color::try_from("#CC824A").unwrap();
        assert_eq!(c, Color(0xCC, 0x82, 0x4A));
        assert_eq!(c.to_string(), "#CC824A");
        assert!(Color::try_from("#12").is_err());
        assert!(Color::try_from("zzzzzz").is_err());
    }
}
