//! Layout calculations for the Molex SlimStack 52991 receptacle.
//!
//! The connector has two parallel rows of 0.5 mm pitch contacts. Everything
//! on the footprint is derived from the pin count and a handful of datasheet
//! constants collected in [`FamilyParams`].
//!
//! # Layout Calculation
//!
//! - Pad X span = pitch × (pins per row − 1)
//! - Body half length = pad X span / 2 + end margin
//! - Courtyard = outer extent + clearance, rounded half away from zero to 0.01 mm
//! - Label offset = courtyard Y + label margin

use serde::Serialize;

use crate::error::LayoutError;

/// Datasheet constants for the connector family, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FamilyParams {
    /// Contact pitch within a row.
    pub pad_x_spacing: f64,
    /// Centre-to-centre distance between the two rows.
    pub pad_y_spacing: f64,
    /// Pad size across the row.
    pub pad_width: f64,
    /// Pad size along the contact.
    pub pad_height: f64,
    /// Half of the body width.
    pub half_body_width: f64,
    /// Distance from the outermost pad centre to the body end.
    pub body_end_margin: f64,
    /// How far the outline break sits inboard of the outermost pad.
    pub outline_inset: f64,
    /// Length of the corner tab markers along the body.
    pub tab_width: f64,
    /// Depth of the corner tab markers away from the body.
    pub tab_height: f64,
    /// Fabrication drawing line width.
    pub fab_line_width: f64,
    /// Silkscreen line width.
    pub silk_line_width: f64,
    /// Offset of silkscreen lines outside the body edge.
    pub silk_nudge: f64,
    /// Distance from the body edge to the end of the pin-1 marker.
    pub marker_length: f64,
    /// Courtyard line width.
    pub courtyard_line_width: f64,
    /// Clearance between the outer extent and the courtyard.
    pub courtyard_clearance: f64,
    /// Grid the courtyard is rounded to.
    pub courtyard_precision: f64,
    /// Gap between the courtyard and the reference/value labels.
    pub label_margin: f64,
}

impl FamilyParams {
    /// Returns the Molex 52991 datasheet values.
    #[must_use]
    pub const fn molex_52991() -> Self {
        Self {
            pad_x_spacing: 0.5,
            pad_y_spacing: 4.0, // 2.2 + 1.8
            pad_width: 0.3,
            pad_height: 1.8,
            half_body_width: 2.15, // 4.3 / 2
            body_end_margin: 2.5,  // 2.15 + 0.35
            outline_inset: 0.3,
            tab_width: 1.3,
            tab_height: 0.5,
            fab_line_width: 0.1,
            silk_line_width: 0.12,
            silk_nudge: 0.15,
            marker_length: 0.8,
            courtyard_line_width: 0.05,
            courtyard_clearance: 0.5,
            courtyard_precision: 0.01,
            label_margin: 0.7,
        }
    }
}

impl Default for FamilyParams {
    fn default() -> Self {
        Self::molex_52991()
    }
}

/// Scalars derived once from the pin count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionSet {
    /// Total pin count across both rows.
    pub pin_count: u32,
    /// Pads in each row.
    pub pads_per_row: u32,
    /// Contact pitch.
    pub pad_x_spacing: f64,
    /// Row centre distance.
    pub pad_y_spacing: f64,
    /// Pad width.
    pub pad_width: f64,
    /// Pad height.
    pub pad_height: f64,
    /// Distance between the first and last pad centre of a row.
    pub pad_x_span: f64,
    /// Half body width (Y).
    pub half_body_width: f64,
    /// Half body length (X).
    pub half_body_length: f64,
    /// Inset of the silkscreen break and pin-1 marker from the body end.
    pub outline_x: f64,
    /// Corner tab length.
    pub tab_width: f64,
    /// Corner tab depth.
    pub tab_height: f64,
    /// Fabrication line width.
    pub fab_line_width: f64,
    /// Silkscreen line width.
    pub silk_line_width: f64,
    /// Silkscreen offset outside the body.
    pub silk_nudge: f64,
    /// Pin-1 marker reach below the body edge.
    pub marker_y: f64,
    /// Courtyard half extent in X, rounded.
    pub courtyard_x: f64,
    /// Courtyard half extent in Y, rounded.
    pub courtyard_y: f64,
    /// Courtyard line width.
    pub courtyard_line_width: f64,
    /// Label X position.
    pub label_x_offset: f64,
    /// Label distance from the origin in Y.
    pub label_y_offset: f64,
}

/// Calculator for SlimStack 52991 receptacles.
#[derive(Debug, Default)]
pub struct SlimStackCalculator {
    params: FamilyParams,
}

impl SlimStackCalculator {
    /// Creates a calculator using the datasheet values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            params: FamilyParams::molex_52991(),
        }
    }

    /// Creates a calculator with custom family parameters.
    #[must_use]
    pub const fn with_params(params: FamilyParams) -> Self {
        Self { params }
    }

    /// Returns the family parameters in use.
    #[must_use]
    pub const fn params(&self) -> &FamilyParams {
        &self.params
    }

    /// Derives the dimension set for `pin_count` total pins.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidPinCount`] if `pin_count` is odd or
    /// smaller than 2.
    pub fn calculate(&self, pin_count: u32) -> Result<DimensionSet, LayoutError> {
        if pin_count < 2 || pin_count % 2 != 0 {
            return Err(LayoutError::InvalidPinCount { pin_count });
        }

        let p = &self.params;
        let pads_per_row = pin_count / 2;

        let pad_x_span = p.pad_x_spacing * f64::from(pads_per_row - 1);
        let half_body_length = pad_x_span / 2.0 + p.body_end_margin;
        let outline_x = half_body_length - pad_x_span / 2.0 - p.outline_inset;

        // Pads stick out further than the body in Y, so they bound the courtyard there
        let courtyard_x = round_to(
            half_body_length + p.courtyard_clearance,
            p.courtyard_precision,
        );
        let courtyard_y = round_to(
            (p.pad_y_spacing + p.pad_height) / 2.0 + p.courtyard_clearance,
            p.courtyard_precision,
        );

        let dims = DimensionSet {
            pin_count,
            pads_per_row,
            pad_x_spacing: p.pad_x_spacing,
            pad_y_spacing: p.pad_y_spacing,
            pad_width: p.pad_width,
            pad_height: p.pad_height,
            pad_x_span,
            half_body_width: p.half_body_width,
            half_body_length,
            outline_x,
            tab_width: p.tab_width,
            tab_height: p.tab_height,
            fab_line_width: p.fab_line_width,
            silk_line_width: p.silk_line_width,
            silk_nudge: p.silk_nudge,
            marker_y: p.marker_length,
            courtyard_x,
            courtyard_y,
            courtyard_line_width: p.courtyard_line_width,
            label_x_offset: 0.0,
            label_y_offset: courtyard_y + p.label_margin,
        };

        tracing::debug!(
            pin_count,
            pad_x_span,
            half_body_length,
            courtyard_x,
            courtyard_y,
            "Calculated SlimStack layout"
        );

        Ok(dims)
    }
}

/// Rounds `value` to the nearest multiple of `precision`, halves away from zero.
///
/// `round_to(4.255, 0.01)` is `4.26` and `round_to(-4.255, 0.01)` is `-4.26`.
#[must_use]
pub fn round_to(value: f64, precision: f64) -> f64 {
    let correction = if value >= 0.0 { 0.5 } else { -0.5 };
    (value / precision + correction).trunc() * precision
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn round_to_half_away_from_zero() {
        assert!(approx_eq(round_to(4.255, 0.01), 4.26));
        assert!(approx_eq(round_to(-4.255, 0.01), -4.26));
        assert!(approx_eq(round_to(2.5, 1.0), 3.0));
        assert!(approx_eq(round_to(-2.5, 1.0), -3.0));
        assert!(approx_eq(round_to(0.5, 1.0), 1.0));
        assert!(approx_eq(round_to(0.0, 0.01), 0.0));
    }

    #[test]
    fn round_to_nearest() {
        assert!(approx_eq(round_to(1.234, 0.01), 1.23));
        assert!(approx_eq(round_to(-1.234, 0.01), -1.23));
        assert!(approx_eq(round_to(1.27, 0.05), 1.25));
        assert!(approx_eq(round_to(7.75, 0.01), 7.75));
    }

    #[test]
    fn round_to_lands_on_grid() {
        for i in -500..500 {
            let value = f64::from(i) * 0.0137;
            let rounded = round_to(value, 0.01);
            let steps = rounded / 0.01;
            assert!((steps - steps.round()).abs() < 1e-6, "{value} -> {rounded}");
            assert!((rounded - value).abs() <= 0.005 + 1e-9);
        }
    }

    #[test]
    fn calculate_40_pins() {
        let dims = SlimStackCalculator::new().calculate(40).unwrap();

        assert_eq!(dims.pads_per_row, 20);
        assert!(approx_eq(dims.pad_x_span, 9.5));
        assert!(approx_eq(dims.half_body_width, 2.15));
        assert!(approx_eq(dims.half_body_length, 7.25));
        assert!(approx_eq(dims.outline_x, 2.2));
        assert!(approx_eq(dims.courtyard_x, 7.75));
        assert!(approx_eq(dims.courtyard_y, 3.4));
        assert!(approx_eq(dims.label_y_offset, 4.1));
        assert!(approx_eq(dims.label_x_offset, 0.0));
    }

    #[test]
    fn two_pins_have_zero_span() {
        let dims = SlimStackCalculator::new().calculate(2).unwrap();
        assert_eq!(dims.pads_per_row, 1);
        assert!(approx_eq(dims.pad_x_span, 0.0));
        assert!(approx_eq(dims.half_body_length, 2.5));
    }

    #[test]
    fn span_grows_by_one_pitch_per_pin_pair() {
        let calc = SlimStackCalculator::new();
        let mut previous = calc.calculate(2).unwrap();

        for pin_count in (4..=100).step_by(2) {
            let dims = calc.calculate(pin_count).unwrap();
            assert!(approx_eq(dims.pad_x_span - previous.pad_x_span, 0.5));
            assert!(dims.half_body_length > previous.half_body_length);
            assert!(dims.courtyard_x > previous.courtyard_x);
            previous = dims;
        }
    }

    #[test]
    fn courtyard_encloses_body_and_pads() {
        let calc = SlimStackCalculator::new();

        for pin_count in (2..=120).step_by(2) {
            let dims = calc.calculate(pin_count).unwrap();
            assert!(dims.courtyard_x > dims.half_body_length);
            assert!(dims.courtyard_y > dims.half_body_width + dims.pad_height / 2.0);
            assert!(dims.courtyard_y > (dims.pad_y_spacing + dims.pad_height) / 2.0);
        }
    }

    #[test]
    fn lengths_are_non_negative() {
        let dims = SlimStackCalculator::new().calculate(2).unwrap();
        for value in [
            dims.pad_x_span,
            dims.half_body_width,
            dims.half_body_length,
            dims.outline_x,
            dims.tab_width,
            dims.tab_height,
            dims.courtyard_x,
            dims.courtyard_y,
            dims.label_y_offset,
        ] {
            assert!(value >= 0.0);
        }
    }

    #[test]
    fn rejects_odd_and_tiny_pin_counts() {
        let calc = SlimStackCalculator::new();
        assert_eq!(
            calc.calculate(7),
            Err(LayoutError::InvalidPinCount { pin_count: 7 })
        );
        assert_eq!(
            calc.calculate(0),
            Err(LayoutError::InvalidPinCount { pin_count: 0 })
        );
        assert!(calc.calculate(1).is_err());
    }

    #[test]
    fn custom_params_flow_through() {
        let params = FamilyParams {
            silk_line_width: 0.2,
            ..FamilyParams::default()
        };
        let dims = SlimStackCalculator::with_params(params)
            .calculate(8)
            .unwrap();
        assert!(approx_eq(dims.silk_line_width, 0.2));
        assert!(approx_eq(dims.fab_line_width, 0.1));
    }
}
