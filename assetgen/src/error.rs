// Error types for asset generation.
//
// Everything in here is the fatal tier: malformed or version-skewed input that
// aborts the current unit of work. Degraded outcomes (missing struct, missing
// parent material) are returned as data, never as an `AssetGenError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetGenError {
    /// `ObjectClass` names a property class this engine version does not know.
    #[error("unknown property class: {0}")]
    UnknownFieldClass(String),
    #[error("{object}: missing required field `{field}`")]
    MissingField { object: String, field: &'static str },
    /// An index field is present but the registry has no descriptor for it.
    #[error("{object}: `{field}` index {index} does not resolve to a property")]
    UnresolvedIndex {
        object: String,
        field: &'static str,
        index: i32,
    },
    /// A struct member name without the `Name_..._GUID` suffix.
    #[error("struct member name `{0}` does not follow the Name_GUID convention")]
    MalformedMemberName(String),
    #[error("{object}: expected field kind {expected}, found {found}")]
    UnexpectedFieldKind {
        object: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("codec error on `{property}`: {message}")]
    Codec { property: String, message: String },
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AssetGenError>;

impl AssetGenError {
    pub fn missing(object: impl Into<String>, field: &'static str) -> Self {
        AssetGenError::MissingField {
            object: object.into(),
            field,
        }
    }
}
