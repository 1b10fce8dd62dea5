#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to deserialize YAML: {0}")]
    YamlDeserialization(serde_yaml::Error),
}

pub type IntakeResult<T> = std::result::Result<T, IntakeError>;
