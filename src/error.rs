use thiserror::Error;

/// Conversion error taxonomy. None of these are recovered locally: any
/// failure aborts the whole run, there is no per-unit partial success.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("rule file error: {message}")]
    Config { message: String },

    #[error("no symbol rule for unit type \"{key}\"")]
    UnknownUnitType { key: String },

    #[error("unrecognized unit size \"{size}\"")]
    UnknownSize { size: String },

    #[error("placemark \"{placemark}\" is missing required field \"{field}\"")]
    MissingField { placemark: String, field: String },

    #[error("malformed input document: {message}")]
    MalformedInput { message: String },

    #[error("failed to serialize MilX output: {message}")]
    XmlWrite { message: String },
}

pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn unknown_unit_type<S: Into<String>>(key: S) -> Self {
        Self::UnknownUnitType { key: key.into() }
    }

    pub fn unknown_size<S: Into<String>>(size: S) -> Self {
        Self::UnknownSize { size: size.into() }
    }

    pub fn missing_field<S1: Into<String>, S2: Into<String>>(placemark: S1, field: S2) -> Self {
        Self::MissingField { placemark: placemark.into(), field: field.into() }
    }

    pub fn malformed_input<S: Into<String>>(message: S) -> Self {
        Self::MalformedInput { message: message.into() }
    }

    pub fn xml_write<S: Into<String>>(message: S) -> Self {
        Self::XmlWrite { message: message.into() }
    }
}
