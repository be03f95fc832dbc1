use std::fmt;

#[derive(Debug)]
pub enum BlueprintError {
    /// File read/write failed at the CLI boundary.
    Io { context: String, source: std::io::Error },

    /// JSON parsing failed (facts file or blueprint input)
    JsonParse { context: String, source: serde_json::Error },

    /// JSON serialization failed (blueprint or chunk output)
    JsonSerialize { context: String, source: serde_json::Error },
}

impl fmt::Display for BlueprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlueprintError::Io { context, source } => {
                write!(f, "I/O error ({}): {}", context, source)
            }
            BlueprintError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            BlueprintError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
        }
    }
}

impl std::error::Error for BlueprintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BlueprintError::Io { source, .. } => Some(source),
            BlueprintError::JsonParse { source, .. } => Some(source),
            BlueprintError::JsonSerialize { source, .. } => Some(source),
        }
    }
}
