//! Core data model for the KML to MilX conversion.

use crate::error::{ConvertError, Result};
use serde::Serialize;
use std::fmt;

/// Character position of the affiliation marker in a base symbol code.
pub const AFFILIATION_INDEX: usize = 1;
/// Character position of the size designator in a base symbol code.
pub const SIZE_INDEX: usize = 11;
/// MilX display-name budget. Names at or under this length pass through
/// untouched; longer names are abbreviated.
pub const MAX_DISPLAY_CHARS: usize = 21;

/// Layer-wide affiliation, derived once per document from the layer name.
///
/// The classification is exhaustive over the layer-name domain: the exporter
/// writes hostile contacts to a layer named exactly "Intel" and everything
/// else is friendly. A third convention would need a new variant here, not a
/// silent fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Affiliation {
    Hostile,
    Friendly,
}

impl Affiliation {
    pub fn from_layer_name(layer_name: &str) -> Self {
        if layer_name == "Intel" {
            Self::Hostile
        } else {
            Self::Friendly
        }
    }

    /// Single-character marker overlaid into the symbol code.
    pub fn marker(self) -> char {
        match self {
            Self::Hostile => 'H',
            Self::Friendly => 'F',
        }
    }
}

/// Symbolic unit size class with its single-character MilX designator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeCode {
    Troop,
    Platoon,
    Squadron,
    Company,
    Battery,
    Battalion,
    Regiment,
    Brigade,
    Division,
    Corps,
    Army,
    Unknown,
}

impl SizeCode {
    /// Parse a size token as written by the exporter (already trimmed and
    /// lower-cased by the caller). An unspecified size arrives as the "na"
    /// sentinel and maps to `Unknown`; anything else unrecognized is fatal.
    pub fn parse(token: &str) -> Result<Self> {
        match token {
            "troop" => Ok(Self::Troop),
            "pl" => Ok(Self::Platoon),
            "squadron" => Ok(Self::Squadron),
            "coy" => Ok(Self::Company),
            "battery" => Ok(Self::Battery),
            "bn" => Ok(Self::Battalion),
            "regiment" => Ok(Self::Regiment),
            "bde" => Ok(Self::Brigade),
            "div" => Ok(Self::Division),
            "corps" => Ok(Self::Corps),
            "army" => Ok(Self::Army),
            "na" => Ok(Self::Unknown),
            other => Err(ConvertError::unknown_size(other)),
        }
    }

    pub fn designator(self) -> char {
        match self {
            Self::Troop | Self::Platoon => 'D',
            Self::Squadron | Self::Battery => 'E',
            Self::Company | Self::Battalion => 'F',
            Self::Regiment => 'G',
            Self::Brigade => 'H',
            Self::Division => 'I',
            Self::Corps => 'J',
            Self::Army => 'K',
            Self::Unknown => '-',
        }
    }
}

/// Fixed-layout symbol identifier.
///
/// Every character position in a base code is semantically meaningful, so the
/// overlay is indexed mutation of a char buffer rather than string splicing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCode {
    chars: Vec<char>,
}

impl SymbolCode {
    /// Wrap a base code from the rule file. The buffer must cover both
    /// overlay positions.
    pub fn parse(base: &str) -> Result<Self> {
        let chars: Vec<char> = base.chars().collect();
        if chars.len() <= SIZE_INDEX {
            return Err(ConvertError::config(format!(
                "base symbol code \"{base}\" is shorter than {} characters",
                SIZE_INDEX + 1
            )));
        }
        Ok(Self { chars })
    }

    pub fn set_affiliation(&mut self, affiliation: Affiliation) {
        self.chars[AFFILIATION_INDEX] = affiliation.marker();
    }

    pub fn set_size(&mut self, size: SizeCode) {
        self.chars[SIZE_INDEX] = size.designator();
    }
}

impl fmt::Display for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// One extracted unit, immutable after creation. Output order matches input
/// document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitRecord {
    pub name: String,
    pub superior: String,
    pub symbol_code: String,
    /// Raw (x, y) coordinate text from the placemark point.
    pub location: (String, String),
}

/// The assembled output layer: constructed once per run and consumed
/// immediately by serialization.
#[derive(Debug, Clone, Serialize)]
pub struct Layer {
    pub name: String,
    pub units: Vec<UnitRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intel_layer_is_hostile() {
        assert_eq!(Affiliation::from_layer_name("Intel"), Affiliation::Hostile);
        assert_eq!(Affiliation::from_layer_name("Intel").marker(), 'H');
    }

    #[test]
    fn any_other_layer_is_friendly() {
        for name in ["Allied", "intel", "INTEL", "", "Axis"] {
            assert_eq!(Affiliation::from_layer_name(name), Affiliation::Friendly);
        }
    }

    #[test]
    fn size_tokens_map_to_designators() {
        let cases = [
            ("troop", 'D'),
            ("pl", 'D'),
            ("squadron", 'E'),
            ("coy", 'F'),
            ("battery", 'E'),
            ("bn", 'F'),
            ("regiment", 'G'),
            ("bde", 'H'),
            ("div", 'I'),
            ("corps", 'J'),
            ("army", 'K'),
            ("na", '-'),
        ];
        for (token, designator) in cases {
            assert_eq!(SizeCode::parse(token).unwrap().designator(), designator);
        }
    }

    #[test]
    fn unrecognized_size_is_fatal() {
        assert!(matches!(
            SizeCode::parse("platoon-ish"),
            Err(ConvertError::UnknownSize { .. })
        ));
    }

    #[test]
    fn overlay_touches_only_the_two_fixed_positions() {
        let mut code = SymbolCode::parse("SFGPUCI-----F---").unwrap();
        code.set_affiliation(Affiliation::Friendly);
        code.set_size(SizeCode::Company);
        assert_eq!(code.to_string(), "SFGPUCI----FF---");
    }

    #[test]
    fn hostile_overlay_sets_the_affiliation_position() {
        let mut code = SymbolCode::parse("SFGPUCI-----F---").unwrap();
        code.set_affiliation(Affiliation::Hostile);
        code.set_size(SizeCode::Unknown);
        assert_eq!(code.to_string(), "SHGPUCI-----F---");
    }

    #[test]
    fn short_base_code_is_rejected() {
        assert!(matches!(
            SymbolCode::parse("SFGPU"),
            Err(ConvertError::Config { .. })
        ));
    }
}
