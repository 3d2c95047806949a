use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error in a config file.
    ConfigParse(String),
    /// Config validation error (bad threshold, empty path, etc.).
    ConfigValidation(String),
    /// Alias table could not be parsed or failed validation.
    AliasParse(String),
    /// A data snapshot is not the expected JSON shape.
    DataParse { source: String, message: String },
    /// Output could not be rendered as JSON.
    Serialize(String),
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::AliasParse(msg) => write!(f, "alias table error: {msg}"),
            Self::DataParse { source, message } => {
                write!(f, "{source}: cannot parse data: {message}")
            }
            Self::Serialize(msg) => write!(f, "cannot serialize output: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
