use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown entity type '{0}' (expected children, orphans, wives or medical-cases)")]
    UnknownEntity(String),
    #[error("invalid {field} value '{value}'")]
    InvalidValue { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
