//! MilX layer serialization.
//!
//! Assembles the extracted unit records plus layer metadata into a
//! map.army compatible MilX XML document. Layer-level metadata
//! (CoordSystemType, ViewScale, SymbolSize) are fixed constants, not derived
//! from input.

use crate::error::{ConvertError, Result};
use crate::types::{Layer, UnitRecord};
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;
use std::path::Path;

const MILX_NS: &str = "http://gs-soft.com/MilX/V3.1";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const MSS_LIBRARY_VERSION: &str = "2025.02.20";

/// Serialize a layer and write it to `path`.
pub fn write_file<P: AsRef<Path>>(layer: &Layer, path: P) -> Result<()> {
    let bytes = to_xml(layer)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Serialize a layer into an indented, UTF-8, standalone="no" XML document.
pub fn to_xml(layer: &Layer) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))
        .map_err(xml_err)?;

    writer
        .create_element("MilXDocument_Layer")
        .with_attribute(("xmlns", MILX_NS))
        .with_attribute(("xmlns:xsi", XSI_NS))
        .write_inner_content::<_, quick_xml::Error>(|writer| {
            writer
                .create_element("MssLibraryVersionTag")
                .write_text_content(BytesText::new(MSS_LIBRARY_VERSION))?;
            writer.create_element("MilXLayer").write_inner_content::<_, quick_xml::Error>(|writer| {
                writer
                    .create_element("Name")
                    .write_text_content(BytesText::new(&layer.name))?;
                writer
                    .create_element("LayerType")
                    .write_text_content(BytesText::new("Normal"))?;
                writer.create_element("GraphicList").write_inner_content::<_, quick_xml::Error>(|writer| {
                    for unit in &layer.units {
                        write_graphic(writer, unit)?;
                    }
                    Ok(())
                })?;
                writer
                    .create_element("CoordSystemType")
                    .write_text_content(BytesText::new("WGS84"))?;
                writer
                    .create_element("ViewScale")
                    .write_text_content(BytesText::new("0.1"))?;
                writer
                    .create_element("SymbolSize")
                    .write_text_content(BytesText::new("1"))?;
                Ok(())
            })?;
            Ok(())
        })
        .map_err(xml_err)?;

    Ok(writer.into_inner().into_inner())
}

fn write_graphic<W: std::io::Write>(
    writer: &mut Writer<W>,
    unit: &UnitRecord,
) -> std::result::Result<(), quick_xml::Error> {
    writer.create_element("MilXGraphic").write_inner_content::<_, quick_xml::Error>(|writer| {
        // The symbol markup travels as escaped text content, exactly as the
        // map.army importer expects.
        writer
            .create_element("MssStringXML")
            .write_text_content(BytesText::new(&symbol_markup(unit)))?;
        writer.create_element("PointList").write_inner_content::<_, quick_xml::Error>(|writer| {
            writer.create_element("Point").write_inner_content::<_, quick_xml::Error>(|writer| {
                writer
                    .create_element("X")
                    .write_text_content(BytesText::new(&unit.location.0))?;
                writer
                    .create_element("Y")
                    .write_text_content(BytesText::new(&unit.location.1))?;
                Ok(())
            })?;
            Ok(())
        })?;
        writer.create_element("SysCustPropList").write_inner_content::<_, quick_xml::Error>(|writer| {
            writer
                .create_element("CustProp")
                .with_attribute(("SystemID", "gs-soft_ma"))
                .with_attribute(("Name", "SDZ"))
                .with_attribute(("DataType", "dt_string"))
                .with_attribute(("Value", ""))
                .write_empty()?;
            Ok(())
        })?;
        Ok(())
    })?;
    Ok(())
}

fn symbol_markup(unit: &UnitRecord) -> String {
    format!(
        "<Symbol ID=\"{}\"><Attribute ID=\"M\">{}</Attribute><Attribute ID=\"T\">{}</Attribute></Symbol>",
        unit.symbol_code, unit.superior, unit.name
    )
}

fn xml_err(e: quick_xml::Error) -> ConvertError {
    ConvertError::xml_write(e.to_string())
}
