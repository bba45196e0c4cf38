use eframe::egui;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::color;

/// Stroke color. Persisted as a `#rrggbb` string so saved drawings stay
/// readable and match what the toolbar shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn from_hex(hex: &str) -> Option<Self> {
        let (r, g, b) = color::parse_hex(hex)?;
        Some(Self { r, g, b })
    }

    pub fn to_hex(self) -> String {
        color::rgb_to_hex(self.r, self.g, self.b)
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgb(self.r, self.g, self.b)
    }

    pub fn from_color32(c: egui::Color32) -> Self {
        let [r, g, b, _] = c.to_array();
        Self { r, g, b }
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color {hex:?}")))
    }
}

/// One line segment between two consecutive pointer samples. Immutable once
/// created; coordinates are canvas-local.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub color: Rgb,
    pub size: f32,
}

/// All strokes produced by one pointer-down-to-pointer-up gesture, in draw
/// order. Empty when the gesture never moved.
pub type StrokeGroup = Vec<Stroke>;

/// Persisted snapshot of a drawing: groups in commit order, strokes within a
/// group in draw order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawingRecord {
    pub filename: String,
    pub strokes: Vec<StrokeGroup>,
}

/// Current toolbar brush. Read by the active gesture, never owned by it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    pub color: Rgb,
    pub size: f32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: Rgb::default(),
            size: 10.0,
        }
    }
}
