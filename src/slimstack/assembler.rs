//! Builds the footprint document from a calculated [`DimensionSet`].
//!
//! Primitives are appended in a fixed order: labels, pad rows, fabrication
//! outline, silkscreen, courtyard and finally the 3D model.

use crate::kicad::{
    Attribute, Footprint, Layer, Line, Model, PadArray, PadLayers, PadShape, PadType, Point,
    PolygonLine, RectLine, Text, TextKind,
};
use crate::slimstack::layout::DimensionSet;
use crate::slimstack::naming;

/// Reference designator placeholder.
const REFERENCE_TEXT: &str = "REF**";

/// User text that KiCad replaces with the reference designator.
const FAB_REFERENCE_TEXT: &str = "%R";

/// Assembles a SlimStack footprint document.
#[derive(Debug)]
pub struct FootprintAssembler<'a> {
    dims: &'a DimensionSet,
    model_path_prefix: &'a str,
}

impl<'a> FootprintAssembler<'a> {
    /// Creates an assembler for the given dimensions.
    #[must_use]
    pub const fn new(dims: &'a DimensionSet, model_path_prefix: &'a str) -> Self {
        Self {
            dims,
            model_path_prefix,
        }
    }

    /// Builds the complete footprint for `part_number`.
    #[must_use]
    pub fn assemble(&self, part_number: &str) -> Footprint {
        let name = naming::footprint_name(self.dims.pin_count, part_number);

        let mut fp = Footprint::new(name.clone());
        fp.set_description(naming::description(self.dims.pin_count));
        fp.set_tags(naming::tags(part_number));
        fp.set_attribute(Attribute::Smd);

        self.add_labels(&mut fp, &name);
        self.add_pads(&mut fp);
        self.add_fab_outline(&mut fp);
        self.add_silkscreen(&mut fp);
        self.add_courtyard(&mut fp);
        fp.append(Model::identity(naming::model_path(
            self.model_path_prefix,
            &name,
        )));

        tracing::debug!(
            footprint = %fp.name,
            primitives = fp.len(),
            pads = fp.pad_count(),
            "Assembled footprint"
        );

        fp
    }

    fn add_labels(&self, fp: &mut Footprint, name: &str) {
        let d = self.dims;
        fp.append(Text::new(
            TextKind::Reference,
            REFERENCE_TEXT,
            Point::new(d.label_x_offset, -d.label_y_offset),
            Layer::FrontSilkscreen,
        ));
        fp.append(Text::new(
            TextKind::User,
            FAB_REFERENCE_TEXT,
            Point::new(0.0, 0.0),
            Layer::FrontFab,
        ));
        fp.append(Text::new(
            TextKind::Value,
            name,
            Point::new(d.label_x_offset, d.label_y_offset),
            Layer::FrontFab,
        ));
    }

    fn add_pads(&self, fp: &mut Footprint) {
        // Odd pins on the top row, even pins facing them on the bottom row
        fp.append(self.pad_row(-self.dims.pad_y_spacing / 2.0, 1));
        fp.append(self.pad_row(self.dims.pad_y_spacing / 2.0, 2));
    }

    fn pad_row(&self, y: f64, initial: u32) -> PadArray {
        let d = self.dims;
        PadArray {
            pad_count: d.pads_per_row,
            x_spacing: d.pad_x_spacing,
            y_spacing: 0.0,
            center: Point::new(0.0, y),
            initial,
            increment: 2,
            pad_type: PadType::Smt,
            shape: PadShape::Rect,
            size: (d.pad_width, d.pad_height),
            layers: PadLayers::SMT,
        }
    }

    fn add_fab_outline(&self, fp: &mut Footprint) {
        let d = self.dims;
        fp.append(RectLine::centred(
            d.half_body_length,
            d.half_body_width,
            Layer::FrontFab,
            d.fab_line_width,
        ));

        let marker_x = -d.half_body_length + d.outline_x;
        fp.append(Line::new(
            Point::new(marker_x, -d.half_body_width - d.silk_nudge),
            Point::new(marker_x, -d.half_body_width - d.marker_y),
            Layer::FrontFab,
            d.fab_line_width,
        ));
    }

    fn add_silkscreen(&self, fp: &mut Footprint) {
        for points in silkscreen_outlines(self.dims) {
            fp.append(PolygonLine::new(
                points,
                Layer::FrontSilkscreen,
                self.dims.silk_line_width,
            ));
        }
    }

    fn add_courtyard(&self, fp: &mut Footprint) {
        let d = self.dims;
        fp.append(RectLine::centred(
            d.courtyard_x,
            d.courtyard_y,
            Layer::FrontCourtyard,
            d.courtyard_line_width,
        ));
    }
}

/// Returns the six silkscreen polylines.
///
/// Order: left outline (with the pin-1 break), right outline, then the
/// top-left, bottom-left, top-right and bottom-right corner tabs.
#[must_use]
pub fn silkscreen_outlines(d: &DimensionSet) -> [Vec<Point>; 6] {
    let l = d.half_body_length;
    let w = d.half_body_width;
    let n = d.silk_nudge;
    let o = d.outline_x;
    let tw = d.tab_width;
    let th = d.tab_height;

    // Left side stops at the pin-1 notch and drops down to the marker
    let left_outline = vec![
        Point::new(-l + o, w + n),
        Point::new(-l - n, w + n),
        Point::new(-l - n, -w - n),
        Point::new(-l + o, -w - n),
        Point::new(-l + o, -w - d.marker_y),
    ];
    let right_outline = vec![
        Point::new(l - o, w + n),
        Point::new(l + n, w + n),
        Point::new(l + n, -w - n),
        Point::new(l - o, -w - n),
    ];
    let top_left_tab = vec![
        Point::new(-l - n, -w - n),
        Point::new(-l - n, -w - n - th),
        Point::new(-l - n + tw, -w - n - th),
        Point::new(-l - n + tw, -w - n),
    ];
    let bottom_left_tab = vec![
        Point::new(-l - n, w + n),
        Point::new(-l - n + tw / 3.0, w + n + th),
        Point::new(-l - n + tw, w + n + th),
        Point::new(-l - n + tw, w + n),
    ];
    let top_right_tab = vec![
        Point::new(l + n, -w - n),
        Point::new(l + n, -w - n - th),
        Point::new(l + n - tw, -w - n - th),
        Point::new(l + n - tw, -w - n),
    ];
    let bottom_right_tab = vec![
        Point::new(l + n, w + n),
        Point::new(l + n, w + n + th),
        Point::new(l + n - tw, w + n + th),
        Point::new(l + n - tw, w + n),
    ];

    [
        left_outline,
        right_outline,
        top_left_tab,
        bottom_left_tab,
        top_right_tab,
        bottom_right_tab,
    ]
}
