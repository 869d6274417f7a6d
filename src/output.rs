//! Console rendering of the extracted layer.
//!
//! Two modes, selected by `--format`:
//! - Terminal: human-readable unit summary with colors
//! - Json: the whole layer as pretty-printed JSON

use crate::cli::OutputFormat;
use crate::types::Layer;
use anyhow::Result;
use colored::Colorize;

pub fn print_layer(layer: &Layer, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(layer)?),
        OutputFormat::Terminal => print_terminal(layer),
    }
    Ok(())
}

fn print_terminal(layer: &Layer) {
    println!(
        "{} ({} {})",
        layer.name.bold(),
        layer.units.len(),
        if layer.units.len() == 1 { "unit" } else { "units" }
    );
    for unit in &layer.units {
        println!(" --- {} --- ", unit.name.cyan().bold());
        println!("Superior: {:<20}", unit.superior);
        println!("Symbol:   {:<20}", unit.symbol_code);
        println!(
            "Location: {:<20}\n",
            format!("({}, {})", unit.location.0, unit.location.1)
        );
    }
}
