//! kml2milx - Convert Command Ops 2 GameStateExporter KML output into
//! map.army compatible MilX symbology layers.
//!
//! The conversion runs in three steps:
//! - extract the relevant unit data (size, name, superior, type, location)
//!   from each placemark of the KML document;
//! - resolve each unit's base symbol code through the human-readable rule
//!   file (`co2milx.txt`) and overlay the layer affiliation and unit size
//!   onto the fixed code positions;
//! - serialize the resulting layer as a MilX XML document.
//!
//! Only basic units are supported; line and polygon sketch placemarks are
//! filtered out.
//!
//! # Example
//!
//! ```no_run
//! use kml2milx::{convert_file, milx, RuleStore};
//!
//! let rules = RuleStore::load("co2milx.txt").unwrap();
//! let layer = convert_file("friendly.kml", &rules).unwrap();
//! milx::write_file(&layer, "out.milxly").unwrap();
//! ```

pub mod abbrev;
pub mod cli;
pub mod error;
pub mod extract;
pub mod milx;
pub mod output;
pub mod rules;
pub mod types;

pub use error::{ConvertError, Result};
pub use rules::RuleStore;
pub use types::{Affiliation, Layer, SizeCode, SymbolCode, UnitRecord};

use std::path::Path;

/// Convert a KML file into a MilX layer using a pre-loaded rule store.
///
/// This is the main entry point for converting programmatically; the rule
/// store is loaded once and reused across calls.
pub fn convert_file<P: AsRef<Path>>(path: P, rules: &RuleStore) -> Result<Layer> {
    let kml = std::fs::read_to_string(path)?;
    extract::convert(&kml, rules)
}
