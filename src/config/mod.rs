pub mod load;
pub mod types;

pub use load::{CONFIG_ENV_VAR, CONFIG_FILE_NAME, resolve_config_path};
pub use types::{
    Config, DefaultPayload, MattermostConfig, OperationDefinition, PreviewSettings,
    WebServerConfig,
};
