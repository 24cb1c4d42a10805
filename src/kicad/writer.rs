//! Text writer for `.kicad_mod` footprint files.
//!
//! Produces the KiCad 5 module grammar. Primitives are grouped by kind
//! (texts, lines, pads, models) while keeping insertion order inside each
//! group, so diffs between regenerated footprints stay small.

use std::fmt::Write as _;
use std::path::Path;

use super::error::{KicadError, KicadResult};
use super::primitives::{Layer, Line, Model, Pad, Point, Primitive, Text, Xyz};
use super::Footprint;

/// Serializes a finished [`Footprint`] to `.kicad_mod` text.
#[derive(Debug)]
pub struct KicadFileHandler<'a> {
    footprint: &'a Footprint,
    timestamp: i64,
}

impl<'a> KicadFileHandler<'a> {
    /// Creates a handler stamped with the current time.
    #[must_use]
    pub fn new(footprint: &'a Footprint) -> Self {
        Self {
            footprint,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Fixes the `tedit` timestamp (UNIX seconds) for reproducible output.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Renders the footprint to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate or size is not finite, or a pad
    /// array has no pads.
    pub fn serialize(&self) -> KicadResult<String> {
        let fp = self.footprint;
        let mut out = String::new();

        let _ = writeln!(
            out,
            "(module {} (layer {}) (tedit {:X})",
            quote(&fp.name),
            Layer::FrontCopper,
            self.timestamp
        );
        if !fp.description.is_empty() {
            let _ = writeln!(out, "  (descr {})", quote_always(&fp.description));
        }
        if !fp.tags.is_empty() {
            let _ = writeln!(out, "  (tags {})", quote_always(&fp.tags));
        }
        if let Some(attribute) = fp.attribute {
            let _ = writeln!(out, "  (attr {})", attribute.keyword());
        }

        let mut lines = Vec::new();
        let mut pads = Vec::new();
        let mut models = Vec::new();

        for primitive in fp.primitives() {
            match primitive {
                Primitive::Text(text) => write_text(&mut out, text)?,
                Primitive::PadArray(array) => {
                    if array.pad_count == 0 {
                        return Err(KicadError::invalid_parameter(
                            "pad_array.pad_count",
                            "pad array must contain at least one pad",
                        ));
                    }
                    pads.extend(array.pads());
                }
                Primitive::RectLine(_) | Primitive::Line(_) | Primitive::PolygonLine(_) => {
                    lines.extend(primitive.lines());
                }
                Primitive::Model(model) => models.push(model),
            }
        }

        for line in &lines {
            write_line(&mut out, line)?;
        }
        for pad in &pads {
            write_pad(&mut out, pad)?;
        }
        for model in models {
            write_model(&mut out, model)?;
        }

        out.push_str(")\n");
        Ok(out)
    }

    /// Serializes the footprint and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn write_file(&self, path: impl AsRef<Path>) -> KicadResult<()> {
        let path = path.as_ref();
        let contents = self.serialize()?;

        std::fs::write(path, contents).map_err(|e| KicadError::file_write(path, e))?;

        tracing::info!(
            path = %path.display(),
            footprint = %self.footprint.name,
            pads = self.footprint.pad_count(),
            "Wrote footprint"
        );

        Ok(())
    }
}

fn write_text(out: &mut String, text: &Text) -> KicadResult<()> {
    let _ = writeln!(
        out,
        "  (fp_text {} {} (at {}) (layer {})",
        text.kind.keyword(),
        quote(&text.text),
        point(text.at, "fp_text.at")?,
        text.layer
    );
    let _ = writeln!(
        out,
        "    (effects (font (size {} {}) (thickness {})))",
        number(text.size.0, "fp_text.size")?,
        number(text.size.1, "fp_text.size")?,
        number(text.thickness, "fp_text.thickness")?
    );
    out.push_str("  )\n");
    Ok(())
}

fn write_line(out: &mut String, line: &Line) -> KicadResult<()> {
    let _ = writeln!(
        out,
        "  (fp_line (start {}) (end {}) (layer {}) (width {}))",
        point(line.start, "fp_line.start")?,
        point(line.end, "fp_line.end")?,
        line.layer,
        number(line.width, "fp_line.width")?
    );
    Ok(())
}

fn write_pad(out: &mut String, pad: &Pad) -> KicadResult<()> {
    let _ = writeln!(
        out,
        "  (pad {} {} {} (at {}) (size {} {}) (layers {}))",
        pad.number,
        pad.pad_type.keyword(),
        pad.shape.keyword(),
        point(pad.at, "pad.at")?,
        number(pad.size.0, "pad.size")?,
        number(pad.size.1, "pad.size")?,
        pad.layers.names().join(" ")
    );
    Ok(())
}

fn write_model(out: &mut String, model: &Model) -> KicadResult<()> {
    let _ = writeln!(out, "  (model {}", quote(&model.filename));
    let _ = writeln!(out, "    (at (xyz {}))", xyz(model.at, "model.at")?);
    let _ = writeln!(out, "    (scale (xyz {}))", xyz(model.scale, "model.scale")?);
    let _ = writeln!(out, "    (rotate (xyz {}))", xyz(model.rotate, "model.rotate")?);
    out.push_str("  )\n");
    Ok(())
}

fn point(p: Point, name: &str) -> KicadResult<String> {
    Ok(format!("{} {}", number(p.x, name)?, number(p.y, name)?))
}

fn xyz(v: Xyz, name: &str) -> KicadResult<String> {
    Ok(format!(
        "{} {} {}",
        number(v.x, name)?,
        number(v.y, name)?,
        number(v.z, name)?
    ))
}

fn number(value: f64, name: &str) -> KicadResult<String> {
    if !value.is_finite() {
        return Err(KicadError::invalid_parameter(
            name,
            format!("value {value} is not finite"),
        ));
    }
    Ok(format_number(value))
}

/// Formats a millimetre value with at most six decimals.
///
/// Trailing zeros are stripped and negative zero prints as `0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    let s = format!("{value:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Quotes a token only when the grammar requires it.
fn quote(token: &str) -> String {
    let needs_quotes = token.is_empty()
        || token
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"' | '\\'));
    if needs_quotes {
        quote_always(token)
    } else {
        token.to_string()
    }
}

fn quote_always(token: &str) -> String {
    let escaped = token.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
