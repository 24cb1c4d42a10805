//! Molex SlimStack 52991 receptacle footprints.
//!
//! Generation runs in two steps:
//!
//! 1. [`layout::SlimStackCalculator`] turns the pin count into a
//!    [`DimensionSet`] of derived scalars.
//! 2. [`assembler::FootprintAssembler`] turns the dimensions into a
//!    [`Footprint`] document ready for [`crate::kicad::KicadFileHandler`].
//!
//! # Example
//!
//! ```
//! use slimstack_footprint::slimstack::Generator;
//!
//! let footprint = Generator::new().generate(40, "0200").unwrap();
//!
//! assert_eq!(footprint.name, "Molex_SlimStack_Receptacle_2x20_Pitch0.5mm_52991-0200");
//! assert_eq!(footprint.pad_count(), 40);
//! ```

pub mod assembler;
pub mod layout;
pub mod naming;

pub use assembler::FootprintAssembler;
pub use layout::{round_to, DimensionSet, FamilyParams, SlimStackCalculator};

use crate::config::Config;
use crate::error::LayoutError;
use crate::kicad::Footprint;

/// Default prefix of the 3D model path.
pub const DEFAULT_MODEL_PATH_PREFIX: &str = "${KISYS3DMOD}/Connectors_Molex.3dshapes";

/// Generates SlimStack footprints with a fixed set of family parameters.
#[derive(Debug)]
pub struct Generator {
    calculator: SlimStackCalculator,
    model_path_prefix: String,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Creates a generator with the datasheet parameters and default model path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            calculator: SlimStackCalculator::new(),
            model_path_prefix: DEFAULT_MODEL_PATH_PREFIX.to_string(),
        }
    }

    /// Creates a generator using the line widths and model path from `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            calculator: SlimStackCalculator::with_params(config.family_params()),
            model_path_prefix: config.output.model_path_prefix.clone(),
        }
    }

    /// Returns the family parameters in use.
    #[must_use]
    pub const fn params(&self) -> &FamilyParams {
        self.calculator.params()
    }

    /// Calculates the dimensions for `pin_count` without building a document.
    ///
    /// # Errors
    ///
    /// Returns an error if `pin_count` is odd or smaller than 2.
    pub fn dimensions(&self, pin_count: u32) -> Result<DimensionSet, LayoutError> {
        self.calculator.calculate(pin_count)
    }

    /// Generates the footprint for `pin_count` pins and a 52991 part suffix.
    ///
    /// # Errors
    ///
    /// Returns an error if the pin count is odd or smaller than 2, or the
    /// part number is not usable in a file name.
    pub fn generate(&self, pin_count: u32, part_number: &str) -> Result<Footprint, LayoutError> {
        naming::validate_part_number(part_number)?;
        let dims = self.calculator.calculate(pin_count)?;

        Ok(FootprintAssembler::new(&dims, &self.model_path_prefix).assemble(part_number))
    }
}
