use derive_from_env::FromEnv;

use crate::error::LogifyError;

/// Logger settings read from `LOGIFY_*` environment variables.
#[derive(FromEnv)]
#[from_env(prefix = "LOGIFY")]
#[allow(non_snake_case)]
pub struct LogifyEnvConfig {
    #[from_env(default = "INFO")]
    pub LEVEL: String,
    #[from_env(default = "false")]
    pub SAVE_TO_FILE: bool,
    #[from_env(default = "log.txt")]
    pub FILE_NAME: String,
    #[from_env(default = "false")]
    pub STDOUT: bool,
}

impl LogifyEnvConfig {
    pub fn load() -> Result<Self, LogifyError> {
        Self::from_env().map_err(|err| LogifyError::Environment(format!("{err:?}")))
    }
}

#[test]
fn test_env_defaults() {
    let config = LogifyEnvConfig::load().unwrap();
    if std::env::var_os("LOGIFY_LEVEL").is_none() {
        assert_eq!(config.LEVEL, "INFO");
    }
    if std::env::var_os("LOGIFY_FILE_NAME").is_none() {
        assert_eq!(config.FILE_NAME, "log.txt");
    }
    if std::env::var_os("LOGIFY_SAVE_TO_FILE").is_none() {
        assert!(!config.SAVE_TO_FILE);
    }
}
