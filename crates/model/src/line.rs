use std::num::ParseIntError;

use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::PathPoint;

/// A line of the network, as listed in the static line table: the
/// rider-facing name, the official color and the polyline drawn on the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub name: String,
    pub color: Color,
    pub points: Vec<PathPoint>,
}

impl HasId for Line {
    type IdType = String;
}

/// A color encoded as a six-digit hexadecimal number, serialized as that
/// hex string. A leading `#` and the three-digit shorthand are accepted on
/// input. Refer to https://htmlcolorcodes.com to generate a valid value.
///
/// # Examples
///
/// `FFFFFF` for white, `000000` for black or `E30613` for the Vitalis
/// network red.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let rgb_strings = if hex.len() == 3 {
            [
                hex[0..1].repeat(2),
                hex[1..2].repeat(2),
                hex[2..3].repeat(2),
            ]
        } else if hex.len() == 6 {
            [
                hex[0..2].to_owned(),
                hex[2..4].to_owned(),
                hex[4..6].to_owned(),
            ]
        } else {
            return None;
        };
        let rgb = rgb_strings
            .iter()
            .map(|val| u8::from_str_radix(val, 16))
            .collect::<Result<Vec<u8>, ParseIntError>>()
            .ok()?;
        Some(Color {
            red: rgb[0],
            green: rgb[1],
            blue: rgb[2],
        })
    }

    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Color::from_hex(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid hex color: {}", raw))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        let color = Color::from_hex("E30613").unwrap();
        assert_eq!(color, Color::from_rgb(227, 6, 19));
    }

    #[test]
    fn parses_shorthand_and_leading_hash() {
        assert_eq!(Color::from_hex("#fff"), Some(Color::from_rgb(255, 255, 255)));
        assert_eq!(Color::from_hex("#0069B4"), Color::from_hex("0069B4"));
    }

    #[test]
    fn rejects_invalid_hex() {
        assert_eq!(Color::from_hex("E306"), None);
        assert_eq!(Color::from_hex("GGGGGG"), None);
    }

    #[test]
    fn hex_survives_a_serde_round_trip() {
        let json = serde_json::to_string(&Color::from_rgb(227, 6, 19)).unwrap();
        assert_eq!(json, "\"E30613\"");
        let color: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(color, Color::from_rgb(227, 6, 19));
    }
}
