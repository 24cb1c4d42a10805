//! Footprint naming for the SlimStack 52991 family.
//!
//! The canonical name is the single source of truth for the footprint title,
//! the value label, the 3D model filename and the output filename.
//!
//! # Name Format
//!
//! `Molex_SlimStack_Receptacle_2x{PINS_PER_ROW:02}_Pitch0.5mm_52991-{PART}`
//!
//! Example: `Molex_SlimStack_Receptacle_2x20_Pitch0.5mm_52991-0200`

use crate::error::LayoutError;

/// File extension of KiCad footprint files.
pub const FOOTPRINT_EXTENSION: &str = "kicad_mod";

/// Extension of the referenced 3D model.
pub const MODEL_EXTENSION: &str = "wrl";

/// Datasheet linked from the footprint description.
pub const DATASHEET_URL: &str = "http://www.molex.com/pdm_docs/sd/529910408_sd.pdf";

/// Generates the canonical footprint name.
///
/// # Examples
///
/// ```
/// use slimstack_footprint::slimstack::naming::footprint_name;
///
/// let name = footprint_name(40, "0200");
/// assert_eq!(name, "Molex_SlimStack_Receptacle_2x20_Pitch0.5mm_52991-0200");
/// ```
#[must_use]
pub fn footprint_name(pin_count: u32, part_number: &str) -> String {
    format!(
        "Molex_SlimStack_Receptacle_2x{:02}_Pitch0.5mm_52991-{part_number}",
        pin_count / 2
    )
}

/// Generates the footprint description.
#[must_use]
pub fn description(pin_count: u32) -> String {
    format!(
        "Molex SlimStack receptacle, 02x{:02} contacts 0.5mm pitch 4mm height, {DATASHEET_URL}",
        pin_count / 2
    )
}

/// Generates the space-separated tag string.
#[must_use]
pub fn tags(part_number: &str) -> String {
    format!("connector molex slimstack 52991-{part_number}")
}

/// Builds the 3D model path for a footprint name.
///
/// A trailing `/` on the prefix is ignored.
#[must_use]
pub fn model_path(prefix: &str, name: &str) -> String {
    format!(
        "{}/{name}.{MODEL_EXTENSION}",
        prefix.trim_end_matches('/')
    )
}

/// Returns the output file name for a footprint name.
#[must_use]
pub fn file_name(name: &str) -> String {
    format!("{name}.{FOOTPRINT_EXTENSION}")
}

/// Checks that a part number suffix is safe to embed in names and paths.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidPartNumber`] if the suffix is empty or
/// contains anything other than ASCII letters, digits, `-`, `_` or `.`.
pub fn validate_part_number(part_number: &str) -> Result<(), LayoutError> {
    let valid = !part_number.is_empty()
        && part_number
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(LayoutError::InvalidPartNumber {
            part_number: part_number.to_string(),
        })
    }
}
