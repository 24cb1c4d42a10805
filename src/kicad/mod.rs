//! KiCad footprint document model and `.kicad_mod` export.
//!
//! A [`Footprint`] is an ordered, append-only list of [`Primitive`]s plus the
//! metadata KiCad stores in the module header. The [`writer`] module turns a
//! finished footprint into the KiCad 5 s-expression text:
//!
//! ```text
//! (module NAME (layer F.Cu) (tedit 5E1A2B3C)
//!   (descr "...")
//!   (tags "...")
//!   (attr smd)
//!   (fp_text ...)      // texts
//!   (fp_line ...)      // lines, rectangles and polylines as segments
//!   (pad ...)          // pads, pad arrays expanded
//!   (model ...)        // 3D models
//! )
//! ```

pub mod error;
pub mod primitives;
pub mod writer;

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

pub use error::{KicadError, KicadResult};
pub use primitives::{
    Layer, Line, Model, Pad, PadArray, PadLayers, PadShape, PadType, Point, PolygonLine,
    Primitive, RectLine, Text, TextKind, Xyz,
};
pub use writer::KicadFileHandler;

/// Mounting attribute written to the `(attr ...)` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Surface mount component.
    Smd,
}

impl Attribute {
    /// Returns the KiCad keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Smd => "smd",
        }
    }
}

/// A complete KiCad footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Footprint name, also used as the module token.
    pub name: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// Space-separated search tags.
    #[serde(default)]
    pub tags: String,

    /// Mounting attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<Attribute>,

    /// Primitives in insertion order.
    #[serde(default)]
    primitives: Vec<Primitive>,
}

impl Footprint {
    /// Creates a new empty footprint with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            tags: String::new(),
            attribute: None,
            primitives: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Sets the tag string.
    pub fn set_tags(&mut self, tags: impl Into<String>) {
        self.tags = tags.into();
    }

    /// Sets the mounting attribute.
    pub fn set_attribute(&mut self, attribute: Attribute) {
        self.attribute = Some(attribute);
    }

    /// Appends a primitive after all previously appended ones.
    pub fn append(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Returns the primitives in insertion order.
    #[must_use]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Returns the number of appended primitives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Returns true if nothing has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Returns the total number of pads after expanding pad arrays.
    #[must_use]
    pub fn pad_count(&self) -> usize {
        self.primitives
            .iter()
            .map(|p| match p {
                Primitive::PadArray(array) => array.pad_count as usize,
                _ => 0,
            })
            .sum()
    }

    /// Returns every pad after expanding pad arrays, in insertion order.
    #[must_use]
    pub fn pads(&self) -> Vec<Pad> {
        self.primitives.iter().flat_map(Primitive::pads).collect()
    }

    /// Returns every line segment after expanding rectangles and polylines.
    #[must_use]
    pub fn lines(&self) -> Vec<Line> {
        self.primitives.iter().flat_map(Primitive::lines).collect()
    }

    /// Dumps the document as an indented tree for diagnostics.
    ///
    /// Composite primitives list the pads or segments they expand to one
    /// level deeper.
    #[must_use]
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "<Footprint(name: {})>", self.name);

        for primitive in &self.primitives {
            let _ = writeln!(out, "  {}", describe(primitive));
            match primitive {
                Primitive::PadArray(array) => {
                    for pad in array.pads() {
                        let _ = writeln!(out, "    {}", describe_pad(&pad));
                    }
                }
                Primitive::RectLine(_) | Primitive::PolygonLine(_) => {
                    for line in primitive.lines() {
                        let _ = writeln!(out, "    {}", describe_line(&line));
                    }
                }
                Primitive::Text(_) | Primitive::Line(_) | Primitive::Model(_) => {}
            }
        }

        out
    }
}

fn describe(primitive: &Primitive) -> String {
    match primitive {
        Primitive::Text(text) => format!(
            "<Text(type: {}, text: {}, at: {}, layer: {})>",
            text.kind.keyword(),
            text.text,
            text.at,
            text.layer
        ),
        Primitive::PadArray(array) => format!(
            "<PadArray(pincount: {}, x_spacing: {}, center: {}, initial: {}, increment: {})>",
            array.pad_count, array.x_spacing, array.center, array.initial, array.increment
        ),
        Primitive::RectLine(rect) => format!(
            "<RectLine(start: {}, end: {}, layer: {}, width: {})>",
            rect.start, rect.end, rect.layer, rect.width
        ),
        Primitive::Line(line) => describe_line(line),
        Primitive::PolygonLine(poly) => format!(
            "<PolygonLine(points: {}, layer: {}, width: {})>",
            poly.points.len(),
            poly.layer,
            poly.width
        ),
        Primitive::Model(model) => format!("<Model(filename: {})>", model.filename),
    }
}

fn describe_line(line: &Line) -> String {
    format!(
        "<Line(start: {}, end: {}, layer: {}, width: {})>",
        line.start, line.end, line.layer, line.width
    )
}

fn describe_pad(pad: &Pad) -> String {
    format!(
        "<Pad(number: {}, type: {}, shape: {}, at: {}, size: [{}, {}])>",
        pad.number,
        pad.pad_type.keyword(),
        pad.shape.keyword(),
        pad.at,
        pad.size.0,
        pad.size.1
    )
}
