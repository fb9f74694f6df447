//! rf-project: appliance and compressor catalogs, their file format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_catalog, validate_system};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown appliance type: {key}")]
    UnknownAppliance { key: String },

    #[error("Unknown compressor type: {key}")]
    UnknownCompressor { key: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const BUILTIN_CATALOG: &str = include_str!("../catalog/builtin.yaml");

impl Catalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> ProjectResult<Self> {
        parse_yaml(BUILTIN_CATALOG)
    }

    pub fn appliance(&self, key: &str) -> ProjectResult<&SystemConfig> {
        self.appliances
            .iter()
            .find(|a| a.id == key)
            .ok_or_else(|| ProjectError::UnknownAppliance {
                key: key.to_string(),
            })
    }

    pub fn compressor(&self, key: &str) -> ProjectResult<&rf_compressor::CompressorParameters> {
        self.compressors
            .iter()
            .find(|c| c.id == key)
            .ok_or_else(|| ProjectError::UnknownCompressor {
                key: key.to_string(),
            })
    }
}

pub fn parse_yaml(content: &str) -> ProjectResult<Catalog> {
    let catalog: Catalog = serde_yaml::from_str(content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<Catalog> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content)
}

pub fn save_yaml(path: &std::path::Path, catalog: &Catalog) -> ProjectResult<()> {
    validate_catalog(catalog)?;
    let content = serde_yaml::to_string(catalog)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<Catalog> {
    let content = std::fs::read_to_string(path)?;
    let catalog: Catalog = serde_json::from_str(&content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

pub fn save_json(path: &std::path::Path, catalog: &Catalog) -> ProjectResult<()> {
    validate_catalog(catalog)?;
    let content = serde_json::to_string_pretty(catalog)?;
    std::fs::write(path, content)?;
    Ok(())
}
