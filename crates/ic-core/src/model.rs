//! Core data model for the idea canvas.
//!
//! Nodes are rectangular content units positioned in world space;
//! connections are directed provenance edges between them. The viewport
//! is the affine map from world space to screen space — `screen =
//! world * scale + offset` — owned by the viewport controller. Nothing
//! here knows how shapes are painted.

use crate::id::NodeId;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

// ─── Canvas constants ────────────────────────────────────────────────────

pub const DEFAULT_NODE_WIDTH: f32 = 280.0;
pub const DEFAULT_NODE_HEIGHT: f32 = 160.0;

/// Zoom clamp range. Scale never leaves [MIN_SCALE, MAX_SCALE].
pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 3.0;

/// Wheel delta → scale delta factor for modifier-held zoom gestures.
pub const ZOOM_SENSITIVITY: f32 = 0.001;

/// Display tints cycled through for new text nodes. Cosmetic only.
pub const NODE_COLORS: [&str; 6] = [
    "#1e293b", // slate (default)
    "#334155",
    "#14532d", // green
    "#7c2d12", // orange
    "#1e3a8a", // blue
    "#581c87", // purple
];

/// Distance from an expanded node to the ring of generated ideas.
pub const EXPANSION_RADIUS: f32 = 350.0;
/// Per-axis jitter added to ring positions so repeated expansions don't stack.
pub const EXPANSION_JITTER: f32 = 50.0;

/// Generated image nodes are square, placed to the right of their source.
pub const IMAGE_NODE_SIZE: f32 = 300.0;
pub const IMAGE_NODE_GAP: f32 = 50.0;
pub const IMAGE_NODE_COLOR: &str = "#000000";

/// Synthesized nodes drop below the midpoint of their two sources.
pub const SYNTHESIS_DROP: f32 = 200.0;
pub const SYNTHESIS_COLOR: &str = "#4f46e5"; // indigo

/// Scatter applied when adding a node at screen center, so repeated
/// adds don't stack perfectly.
pub const ADD_NODE_SCATTER: f32 = 40.0;

// ─── Vectors & bounds ────────────────────────────────────────────────────

/// A 2D point or delta. Used for both world-space and screen-space
/// coordinates; the containing API documents which.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// World-space extent of a node. Height is a minimum — rendered content
/// may grow it visually, but the stored value is not live-updated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_WIDTH, DEFAULT_NODE_HEIGHT)
    }
}

/// Axis-aligned world-space bounding box.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

// ─── Color ───────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgba(
                    (r * 17) as f32 / 255.0,
                    (g * 17) as f32 / 255.0,
                    (b * 17) as f32 / 255.0,
                    1.0,
                ))
            }
            6 | 8 => {
                let r = hex_val(bytes[0])? << 4 | hex_val(bytes[1])?;
                let g = hex_val(bytes[2])? << 4 | hex_val(bytes[3])?;
                let b = hex_val(bytes[4])? << 4 | hex_val(bytes[5])?;
                let a = if bytes.len() == 8 {
                    hex_val(bytes[6])? << 4 | hex_val(bytes[7])?
                } else {
                    255
                };
                Some(Self::rgba(
                    r as f32 / 255.0,
                    g as f32 / 255.0,
                    b as f32 / 255.0,
                    a as f32 / 255.0,
                ))
            }
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let r = (self.r * 255.0).round() as u8;
        let g = (self.g * 255.0).round() as u8;
        let b = (self.b * 255.0).round() as u8;
        let a = (self.a * 255.0).round() as u8;
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

/// Resolve a palette entry by index (wrapping), falling back to the
/// default slate tint if the table entry fails to parse.
pub fn palette_color(index: usize) -> Color {
    Color::from_hex(NODE_COLORS[index % NODE_COLORS.len()])
        .unwrap_or(Color::rgba(0.118, 0.161, 0.231, 1.0))
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// What a node carries: plain text, or an image with the text as caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Text,
    /// Image payload is an opaque reference — a data URI or host handle.
    Image { data: String },
}

/// A rectangular idea node placed on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaNode {
    pub id: NodeId,

    /// Top-left corner, world-space units.
    pub position: Vec2,

    /// World-space extent. Height is a minimum, not live-measured.
    pub size: Size,

    /// Text payload; doubles as the caption for image nodes.
    pub content: String,

    pub kind: NodeKind,

    /// Display tint. Cosmetic only, no invariant.
    pub color: Color,

    /// Set while an asynchronous action targeting this node is outstanding.
    pub busy: bool,

    /// Message from the most recent failed action on this node.
    pub last_error: Option<String>,
}

impl IdeaNode {
    /// A new text node with a fresh id and default size/tint.
    pub fn text(position: Vec2, content: impl Into<String>) -> Self {
        Self {
            id: NodeId::fresh(),
            position,
            size: Size::default(),
            content: content.into(),
            kind: NodeKind::Text,
            color: palette_color(0),
            busy: false,
            last_error: None,
        }
    }

    /// A new image node. The caption text is kept as `content`.
    pub fn image(position: Vec2, caption: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: NodeId::fresh(),
            position,
            size: Size::new(IMAGE_NODE_SIZE, IMAGE_NODE_SIZE),
            content: caption.into(),
            kind: NodeKind::Image { data: data.into() },
            color: Color::from_hex(IMAGE_NODE_COLOR).unwrap_or(Color::rgba(0.0, 0.0, 0.0, 1.0)),
            busy: false,
            last_error: None,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.position.x,
            y: self.position.y,
            width: self.size.width,
            height: self.size.height,
        }
    }
}

// ─── Viewport & tool mode ────────────────────────────────────────────────

/// The affine world→screen transform: `screen = world * scale + offset`.
///
/// `offset` is a screen-space translation; `scale` is clamped to
/// [`MIN_SCALE`, `MAX_SCALE`] by the viewport controller, the only
/// place it changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub offset: Vec2,
    pub scale: f32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

/// Governs how a default pointer-down is interpreted. Independent of
/// the transient drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolMode {
    #[default]
    Select,
    Hand,
}
