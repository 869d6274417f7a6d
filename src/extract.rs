//! KML unit extraction.
//!
//! Walks the placemarks of a GameStateExporter KML document in document
//! order, resolves each unit's base symbol code through the [`RuleStore`],
//! overlays the document-wide affiliation and the per-unit size, and emits
//! [`UnitRecord`]s. Tag matching is by local name, so the KML default
//! namespace needs no special handling.

use crate::abbrev;
use crate::error::{ConvertError, Result};
use crate::rules::RuleStore;
use crate::types::{Affiliation, Layer, SizeCode, SymbolCode, UnitRecord};
use roxmltree::{Document, Node};
use tracing::debug;

/// Convert a KML document into a MilX-ready layer.
///
/// Any per-unit failure aborts the whole run: the output is either a
/// complete layer or nothing.
pub fn convert(kml: &str, rules: &RuleStore) -> Result<Layer> {
    let doc = Document::parse(kml)
        .map_err(|e| ConvertError::malformed_input(format!("KML parse failure: {e}")))?;

    let layer_name = doc
        .descendants()
        .find(|n| n.has_tag_name("Document"))
        .and_then(|d| d.children().find(|n| n.has_tag_name("name")))
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConvertError::malformed_input("document has no layer name"))?;

    let affiliation = Affiliation::from_layer_name(layer_name);
    debug!("layer \"{layer_name}\" classified as {affiliation:?}");

    let mut units = Vec::new();
    for placemark in doc.descendants().filter(|n| n.has_tag_name("Placemark")) {
        if is_sketch(&placemark) {
            debug!("skipping sketch placemark");
            continue;
        }
        units.push(extract_unit(&placemark, affiliation, rules)?);
    }

    Ok(Layer { name: layer_name.to_string(), units })
}

/// Sketch placemarks (subordinate lines, movement arrows) carry line
/// geometry as an immediate child and are not unit markers.
fn is_sketch(placemark: &Node) -> bool {
    placemark
        .children()
        .any(|c| c.is_element() && c.has_tag_name("LineString"))
}

fn extract_unit(placemark: &Node, affiliation: Affiliation, rules: &RuleStore) -> Result<UnitRecord> {
    let name = child_text(placemark, "name")
        .ok_or_else(|| ConvertError::missing_field("<unnamed>", "name"))?;

    let coordinates = placemark
        .children()
        .find(|n| n.has_tag_name("Point"))
        .and_then(|p| p.children().find(|n| n.has_tag_name("coordinates")))
        .and_then(|n| n.text())
        .ok_or_else(|| ConvertError::missing_field(name.clone(), "Point coordinates"))?;
    // Only (x, y); a trailing altitude component is ignored.
    let mut parts = coordinates.trim().split(',');
    let x = parts.next().unwrap_or_default().trim().to_string();
    let y = parts
        .next()
        .ok_or_else(|| ConvertError::missing_field(name.clone(), "Point coordinates"))?
        .trim()
        .to_string();

    let mut superior = String::new();
    let mut size_token = "na".to_string();
    let mut type_key = None;

    if let Some(extended) = placemark.children().find(|n| n.has_tag_name("ExtendedData")) {
        if let Some(value) = data_value(&extended, "superior") {
            superior = value.trim().to_string();
        }
        if let Some(value) = data_value(&extended, "size") {
            size_token = value.trim().to_lowercase();
        }
        if let Some(unit_type) = data_value(&extended, "type") {
            // The lookup key is the comma-join, so a type without a subtype
            // is malformed.
            let subtype = data_value(&extended, "subtype")
                .ok_or_else(|| ConvertError::missing_field(name.clone(), "subtype"))?;
            type_key = Some((
                unit_type.trim().to_lowercase(),
                subtype.trim().to_lowercase(),
            ));
        }
    }

    let base = match &type_key {
        Some((category, subcategory)) => rules.lookup(category, subcategory)?,
        // No extended data at all: the pair is unresolved and there is no
        // fallback code.
        None => return Err(ConvertError::unknown_unit_type("")),
    };

    let mut code = SymbolCode::parse(base)?;
    code.set_affiliation(affiliation);
    code.set_size(SizeCode::parse(&size_token)?);

    Ok(UnitRecord {
        name: abbrev::shorten(&name),
        superior: abbrev::shorten(&superior),
        symbol_code: code.to_string(),
        location: (x, y),
    })
}

fn child_text(node: &Node, tag: &str) -> Option<String> {
    node.children()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
}

/// Text of `<Data name="NAME"><value>..</value></Data>` under ExtendedData.
fn data_value(extended: &Node, name: &str) -> Option<String> {
    extended
        .children()
        .find(|n| n.has_tag_name("Data") && n.attribute("name") == Some(name))
        .and_then(|d| d.children().find(|n| n.has_tag_name("value")))
        .and_then(|n| n.text())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://www.opengis.net/kml/2.2";

    fn rules() -> RuleStore {
        RuleStore::parse("infantry,line : SFGPUCI-----F---\narmour,tank : SFGPUCA-----F---")
            .unwrap()
    }

    fn kml(layer_name: &str, placemarks: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <kml xmlns=\"{NS}\"><Document><name>{layer_name}</name>{placemarks}</Document></kml>"
        )
    }

    fn unit_placemark(name: &str, size: &str) -> String {
        format!(
            "<Placemark><name>{name}</name>\
             <Point><coordinates>-0.5263,49.3201,0</coordinates></Point>\
             <ExtendedData>\
             <Data name=\"superior\"><value>3 Brigade</value></Data>\
             <Data name=\"size\"><value>{size}</value></Data>\
             <Data name=\"type\"><value>Infantry</value></Data>\
             <Data name=\"subtype\"><value>Line</value></Data>\
             </ExtendedData></Placemark>"
        )
    }

    #[test]
    fn extracts_units_in_document_order() {
        let doc = kml(
            "Allied",
            &format!("{}{}", unit_placemark("1 Bn", "bn"), unit_placemark("2 Bn", "coy")),
        );
        let layer = convert(&doc, &rules()).unwrap();
        assert_eq!(layer.name, "Allied");
        assert_eq!(layer.units.len(), 2);
        assert_eq!(layer.units[0].name, "1 Bn");
        assert_eq!(layer.units[1].name, "2 Bn");
        assert_eq!(layer.units[0].superior, "3 Brigade");
        assert_eq!(layer.units[0].location, ("-0.5263".to_string(), "49.3201".to_string()));
    }

    #[test]
    fn company_size_and_friendly_affiliation_are_overlaid() {
        // Base code "SFGPUCI-----F---" with size "coy" in a non-Intel layer:
        // only the affiliation and size positions change.
        let doc = kml("Allied", &unit_placemark("A Coy", "coy"));
        let layer = convert(&doc, &rules()).unwrap();
        assert_eq!(layer.units[0].symbol_code, "SFGPUCI----FF---");
    }

    #[test]
    fn intel_layer_marks_every_unit_hostile() {
        let doc = kml(
            "Intel",
            &format!("{}{}", unit_placemark("En 1", "bn"), unit_placemark("En 2", "na")),
        );
        let layer = convert(&doc, &rules()).unwrap();
        for unit in &layer.units {
            assert_eq!(unit.symbol_code.chars().nth(1), Some('H'));
        }
        assert_eq!(layer.units[1].symbol_code.chars().nth(11), Some('-'));
    }

    #[test]
    fn line_sketch_placemarks_are_excluded() {
        let sketch = "<Placemark><name>axis of advance</name>\
                      <LineString><coordinates>0,0 1,1</coordinates></LineString></Placemark>";
        let doc = kml("Allied", &format!("{}{sketch}", unit_placemark("1 Bn", "bn")));
        let layer = convert(&doc, &rules()).unwrap();
        assert_eq!(layer.units.len(), 1);
        assert_eq!(layer.units[0].name, "1 Bn");
    }

    #[test]
    fn missing_layer_name_is_malformed_input() {
        let doc = format!("<kml xmlns=\"{NS}\"><Document></Document></kml>");
        assert!(matches!(
            convert(&doc, &rules()),
            Err(ConvertError::MalformedInput { .. })
        ));
    }

    #[test]
    fn missing_placemark_name_is_a_missing_field() {
        let placemark = "<Placemark>\
                         <Point><coordinates>0,0</coordinates></Point></Placemark>";
        let doc = kml("Allied", placemark);
        assert!(matches!(
            convert(&doc, &rules()),
            Err(ConvertError::MissingField { .. })
        ));
    }

    #[test]
    fn unknown_unit_type_aborts_the_run() {
        let placemark = "<Placemark><name>1 Bn</name>\
             <Point><coordinates>0,0</coordinates></Point>\
             <ExtendedData>\
             <Data name=\"type\"><value>cavalry</value></Data>\
             <Data name=\"subtype\"><value>horse</value></Data>\
             </ExtendedData></Placemark>";
        let doc = kml("Allied", placemark);
        match convert(&doc, &rules()) {
            Err(ConvertError::UnknownUnitType { key }) => assert_eq!(key, "cavalry,horse"),
            other => panic!("expected UnknownUnitType, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_size_aborts_the_run() {
        let doc = kml("Allied", &unit_placemark("1 Bn", "platoonish"));
        assert!(matches!(
            convert(&doc, &rules()),
            Err(ConvertError::UnknownSize { .. })
        ));
    }

    #[test]
    fn missing_extended_data_leaves_the_type_unresolved() {
        let placemark = "<Placemark><name>1 Bn</name>\
                         <Point><coordinates>0,0</coordinates></Point></Placemark>";
        let doc = kml("Allied", placemark);
        assert!(matches!(
            convert(&doc, &rules()),
            Err(ConvertError::UnknownUnitType { .. })
        ));
    }

    #[test]
    fn long_names_are_abbreviated_on_the_way_out() {
        let doc = kml(
            "Allied",
            &unit_placemark("2nd Battalion Princess Louise Fusiliers", "bn"),
        );
        let layer = convert(&doc, &rules()).unwrap();
        assert_eq!(layer.units[0].name, "2 B.P.L.F.");
    }

    #[test]
    fn altitude_component_is_ignored() {
        let doc = kml("Allied", &unit_placemark("1 Bn", "bn"));
        let layer = convert(&doc, &rules()).unwrap();
        assert_eq!(layer.units[0].location.1, "49.3201");
    }
}
