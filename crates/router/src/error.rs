use thiserror::Error;

pub type Result<T> = std::result::Result<T, RouterError>;

#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Catalog has no tools; at least one tool must be registered")]
    EmptyCatalog,

    #[error("Parameters '{first}' and '{second}' both normalize to '{canonical}'")]
    ParameterConflict {
        canonical: String,
        first: String,
        second: String,
    },

    #[error("Tools '{first}' and '{second}' share the normalized name '{key}'")]
    ToolKeyConflict {
        key: String,
        first: String,
        second: String,
    },

    #[error("Alias '{alias}' shadows tool '{tool}' but maps to '{target}'")]
    AliasShadowsTool {
        alias: String,
        tool: String,
        target: String,
    },

    #[error("Alias '{alias}' maps to unknown tool '{target}'")]
    UnknownAliasTarget { alias: String, target: String },

    #[error("Aliases normalizing to '{alias}' map to both '{first}' and '{second}'")]
    AliasConflict {
        alias: String,
        first: String,
        second: String,
    },

    #[error("Invalid router configuration: {0}")]
    InvalidConfig(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] intent_catalog::CatalogError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl RouterError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
