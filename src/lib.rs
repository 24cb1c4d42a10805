//! slimstack-footprint: KiCad footprint generator for Molex SlimStack 52991 receptacles
//!
//! This library derives the land pattern, fabrication outline, silkscreen,
//! courtyard and 3D model reference of a 52991 receptacle from its pin count,
//! and writes the result as a KiCad `.kicad_mod` footprint.
//!
//! # Architecture
//!
//! - **Layout**: all geometry is derived from one [`slimstack::DimensionSet`],
//!   computed once per pin count from the datasheet constants
//! - **Document**: the footprint is an ordered list of generic drawing
//!   primitives ([`kicad::Footprint`]), independent of the output format
//! - **Output**: [`kicad::KicadFileHandler`] renders the document as KiCad
//!   S-expressions
//!
//! # Modules
//!
//! - [`config`]: Configuration loading and validation
//! - [`error`]: Error types
//! - [`kicad`]: Footprint document model and `.kicad_mod` writer
//! - [`slimstack`]: SlimStack 52991 dimensions and footprint assembly

pub mod config;
pub mod error;
pub mod kicad;
pub mod slimstack;
