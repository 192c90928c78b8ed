use thiserror::Error;

#[derive(Error, Debug)]
pub enum CityError {
    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Script error on line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("Sprite error: {0}")]
    Sprite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CityError>;
