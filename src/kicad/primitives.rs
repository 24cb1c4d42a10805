//! Footprint primitive types for `.kicad_mod` files.
//!
//! These types represent the geometric elements that make up a footprint:
//! text, pads, pad arrays, lines, rectangles, polylines and 3D models.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A 2D point in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (mm).
    pub x: f64,
    /// Y coordinate (mm), positive pointing down as in KiCad.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// A 3D vector used for model placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Xyz {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Xyz {
    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// All-ones vector (identity scale).
    #[must_use]
    pub const fn ones() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// KiCad graphic layers used by footprint drawings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Front copper.
    #[serde(rename = "F.Cu")]
    FrontCopper,
    /// Front silkscreen.
    #[serde(rename = "F.SilkS")]
    FrontSilkscreen,
    /// Front fabrication drawing.
    #[serde(rename = "F.Fab")]
    FrontFab,
    /// Front courtyard.
    #[serde(rename = "F.CrtYd")]
    FrontCourtyard,
}

impl Layer {
    /// Returns the KiCad layer name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FrontCopper => "F.Cu",
            Self::FrontSilkscreen => "F.SilkS",
            Self::FrontFab => "F.Fab",
            Self::FrontCourtyard => "F.CrtYd",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Set of copper, paste and mask layers a pad is present on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PadLayers: u8 {
        /// Front copper.
        const F_CU = 0x01;
        /// Front solder paste.
        const F_PASTE = 0x02;
        /// Front solder mask.
        const F_MASK = 0x04;
    
        /// Standard layer set for a front-side SMD pad.
        const SMT = Self::F_CU.bits() | Self::F_PASTE.bits() | Self::F_MASK.bits();
    }
}

impl PadLayers {
    /// Returns the KiCad names of the layers in the set, in canonical order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        const ORDER: [(PadLayers, &str); 3] = [
            (PadLayers::F_CU, "F.Cu"),
            (PadLayers::F_PASTE, "F.Paste"),
            (PadLayers::F_MASK, "F.Mask"),
        ];
        ORDER
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

/// Text kind as understood by KiCad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    /// Reference designator (`REF**`).
    Reference,
    /// Value field.
    Value,
    /// Free user text.
    User,
}

impl TextKind {
    /// Returns the KiCad keyword for this kind.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Value => "value",
            Self::User => "user",
        }
    }
}

/// A text string on a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// Text kind.
    pub kind: TextKind,
    /// Text content.
    pub text: String,
    /// Anchor position.
    pub at: Point,
    /// Layer the text is on.
    pub layer: Layer,
    /// Glyph size (width, height) in mm.
    pub size: (f64, f64),
    /// Stroke thickness in mm.
    pub thickness: f64,
}

impl Text {
    /// Default glyph size in mm.
    pub const DEFAULT_SIZE: (f64, f64) = (1.0, 1.0);

    /// Default stroke thickness in mm.
    pub const DEFAULT_THICKNESS: f64 = 0.15;

    /// Creates a text with the default 1 mm font.
    #[must_use]
    pub fn new(kind: TextKind, text: impl Into<String>, at: Point, layer: Layer) -> Self {
        Self {
            kind,
            text: text.into(),
            at,
            layer,
            size: Self::DEFAULT_SIZE,
            thickness: Self::DEFAULT_THICKNESS,
        }
    }
}

/// Pad technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadType {
    /// Surface mount pad.
    #[default]
    Smt,
}

impl PadType {
    /// Returns the KiCad keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Smt => "smd",
        }
    }
}

/// Pad shape types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadShape {
    /// Rectangular pad.
    #[default]
    Rect,
}

impl PadShape {
    /// Returns the KiCad keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Rect => "rect",
        }
    }
}

/// A single copper pad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    /// Pad number.
    pub number: u32,
    /// Pad technology.
    pub pad_type: PadType,
    /// Pad shape.
    pub shape: PadShape,
    /// Pad centre.
    pub at: Point,
    /// Pad size (width, height) in mm.
    pub size: (f64, f64),
    /// Layers the pad is present on.
    pub layers: PadLayers,
}

/// A linear run of identical pads at a fixed pitch, centred on a point.
///
/// Pad `i` gets number `initial + i * increment`, which allows two parallel
/// rows to carry interleaved odd/even numbering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadArray {
    /// Number of pads in the run.
    pub pad_count: u32,
    /// Pitch along X in mm.
    pub x_spacing: f64,
    /// Pitch along Y in mm.
    pub y_spacing: f64,
    /// Centre of the run.
    pub center: Point,
    /// Number of the first pad.
    pub initial: u32,
    /// Number step between neighbouring pads.
    pub increment: u32,
    /// Pad technology.
    pub pad_type: PadType,
    /// Pad shape.
    pub shape: PadShape,
    /// Pad size (width, height) in mm.
    pub size: (f64, f64),
    /// Layers each pad is present on.
    pub layers: PadLayers,
}

impl PadArray {
    /// Expands the array into individual pads, first pad at the negative end.
    #[must_use]
    pub fn pads(&self) -> Vec<Pad> {
        let half_steps = f64::from(self.pad_count.saturating_sub(1)) / 2.0;
        let start_x = self.center.x - half_steps * self.x_spacing;
        let start_y = self.center.y - half_steps * self.y_spacing;

        (0..self.pad_count)
            .map(|i| {
                let offset = f64::from(i);
                Pad {
                    number: self.initial + i * self.increment,
                    pad_type: self.pad_type,
                    shape: self.shape,
                    at: Point::new(
                        offset.mul_add(self.x_spacing, start_x),
                        offset.mul_add(self.y_spacing, start_y),
                    ),
                    size: self.size,
                    layers: self.layers,
                }
            })
            .collect()
    }

    /// Returns the pad numbers in array order.
    #[must_use]
    pub fn numbers(&self) -> Vec<u32> {
        (0..self.pad_count)
            .map(|i| self.initial + i * self.increment)
            .collect()
    }
}

/// A single line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Layer.
    pub layer: Layer,
    /// Stroke width in mm.
    pub width: f64,
}

impl Line {
    /// Creates a new line segment.
    #[must_use]
    pub const fn new(start: Point, end: Point, layer: Layer, width: f64) -> Self {
        Self {
            start,
            end,
            layer,
            width,
        }
    }
}

/// An axis-aligned rectangle outline given by two opposite corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectLine {
    /// First corner.
    pub start: Point,
    /// Opposite corner.
    pub end: Point,
    /// Layer.
    pub layer: Layer,
    /// Stroke width in mm.
    pub width: f64,
}

impl RectLine {
    /// Creates a new rectangle outline.
    #[must_use]
    pub const fn new(start: Point, end: Point, layer: Layer, width: f64) -> Self {
        Self {
            start,
            end,
            layer,
            width,
        }
    }

    /// Creates a rectangle centred on the origin from half extents.
    #[must_use]
    pub const fn centred(half_x: f64, half_y: f64, layer: Layer, width: f64) -> Self {
        Self::new(
            Point::new(-half_x, -half_y),
            Point::new(half_x, half_y),
            layer,
            width,
        )
    }

    /// Expands the outline into its four sides.
    #[must_use]
    pub const fn lines(&self) -> [Line; 4] {
        let (s, e) = (self.start, self.end);
        let corner_a = Point::new(e.x, s.y);
        let corner_b = Point::new(s.x, e.y);
        [
            Line::new(s, corner_a, self.layer, self.width),
            Line::new(corner_a, e, self.layer, self.width),
            Line::new(e, corner_b, self.layer, self.width),
            Line::new(corner_b, s, self.layer, self.width),
        ]
    }
}

/// An open polyline through an ordered list of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonLine {
    /// Vertices in drawing order.
    pub points: Vec<Point>,
    /// Layer.
    pub layer: Layer,
    /// Stroke width in mm.
    pub width: f64,
}

impl PolygonLine {
    /// Creates a new polyline.
    #[must_use]
    pub fn new(points: impl Into<Vec<Point>>, layer: Layer, width: f64) -> Self {
        Self {
            points: points.into(),
            layer,
            width,
        }
    }

    /// Expands the polyline into `points.len() - 1` segments.
    #[must_use]
    pub fn lines(&self) -> Vec<Line> {
        self.points
            .windows(2)
            .map(|pair| Line::new(pair[0], pair[1], self.layer, self.width))
            .collect()
    }
}

/// A reference to an external 3D model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Model path, usually with an environment-variable prefix.
    pub filename: String,
    /// Offset.
    pub at: Xyz,
    /// Scale.
    pub scale: Xyz,
    /// Rotation in degrees.
    pub rotate: Xyz,
}

impl Model {
    /// Creates a model reference at identity position, scale and rotation.
    #[must_use]
    pub fn identity(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            at: Xyz::default(),
            scale: Xyz::ones(),
            rotate: Xyz::default(),
        }
    }
}

/// Any primitive that can be appended to a footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    /// Text label.
    Text(Text),
    /// Run of pads.
    PadArray(PadArray),
    /// Rectangle outline.
    RectLine(RectLine),
    /// Line segment.
    Line(Line),
    /// Open polyline.
    PolygonLine(PolygonLine),
    /// 3D model reference.
    Model(Model),
}

impl Primitive {
    /// Returns the line segments this primitive draws, if any.
    #[must_use]
    pub fn lines(&self) -> Vec<Line> {
        match self {
            Self::RectLine(rect) => rect.lines().to_vec(),
            Self::Line(line) => vec![*line],
            Self::PolygonLine(poly) => poly.lines(),
            Self::Text(_) | Self::PadArray(_) | Self::Model(_) => Vec::new(),
        }
    }

    /// Returns the pads this primitive places, if any.
    #[must_use]
    pub fn pads(&self) -> Vec<Pad> {
        match self {
            Self::PadArray(array) => array.pads(),
            _ => Vec::new(),
        }
    }
}

impl From<Text> for Primitive {
    fn from(value: Text) -> Self {
        Self::Text(value)
    }
}

impl From<PadArray> for Primitive {
    fn from(value: PadArray) -> Self {
        Self::PadArray(value)
    }
}

impl From<RectLine> for Primitive {
    fn from(value: RectLine) -> Self {
        Self::RectLine(value)
    }
}

impl From<Line> for Primitive {
    fn from(value: Line) -> Self {
        Self::Line(value)
    }
}

impl From<PolygonLine> for Primitive {
    fn from(value: PolygonLine) -> Self {
        Self::PolygonLine(value)
    }
}

impl From<Model> for Primitive {
    fn from(value: Model) -> Self {
        Self::Model(value)
    }
}
