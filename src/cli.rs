use clap::Parser;

/// Rule file looked for in the working directory when `--rules` is not given.
pub const DEFAULT_RULES_FILE: &str = "co2milx.txt";

#[derive(Parser, Debug)]
#[command(name = "kml2milx")]
#[command(about = "Convert Command Ops 2 GameStateExporter KML into a map.army MilX layer")]
#[command(version)]
pub struct Args {
    /// KML file exported by GameStateExporter
    pub input: String,

    /// MilX layer file to write
    pub output: String,

    /// Unit type conversion rule file
    #[arg(short, long, default_value = DEFAULT_RULES_FILE)]
    pub rules: String,

    /// Console summary format (json, terminal)
    #[arg(short, long, default_value = "terminal")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output for machine consumption
    Json,
    /// Human-readable terminal output
    Terminal,
}
