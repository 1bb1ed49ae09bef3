//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::EtlConfig;
use super::secret::secret_string;
use crate::domain::errors::EtlError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "SURNAME_ETL_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into EtlConfig
/// 4. Applies environment variable overrides (SURNAME_ETL_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`EtlError::Configuration`] if the file cannot be read, a
/// referenced variable is unset, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use surname_etl::config::loader::load_config;
///
/// let config = load_config("surname-etl.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<EtlConfig> {
    let config = read_config(path)?;
    validate(&config)?;
    Ok(config)
}

/// Reads a configuration file and applies environment overrides, without validating
///
/// Used by commands that apply their own flags before validation.
pub fn read_config(path: impl AsRef<Path>) -> Result<EtlConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(EtlError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        EtlError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut config = parse_config(&contents)?;
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Validates a configuration, mapping failures to [`EtlError::Configuration`]
pub fn validate(config: &EtlConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| EtlError::Configuration(format!("Configuration validation failed: {}", e)))
}

/// Substitute `${VAR}` placeholders and parse TOML, without validation
pub fn parse_config(contents: &str) -> Result<EtlConfig> {
    let contents = substitute_env_vars(contents)?;

    toml::from_str(&contents)
        .map_err(|e| EtlError::Configuration(format!("Failed to parse TOML: {}", e)))
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |cap: &regex::Captures| {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(EtlError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

/// Applies environment variable overrides using the SURNAME_ETL_* prefix
///
/// Variables follow the pattern `SURNAME_ETL_<SECTION>_<KEY>`, for example
/// `SURNAME_ETL_SOURCE_ARCHIVE_PATH` or `SURNAME_ETL_POSTGRESQL_TABLE_NAME`.
/// Unparseable numeric and boolean values are ignored.
fn apply_env_overrides(config: &mut EtlConfig) {
    if let Some(val) = env("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = env("APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(config.application.dry_run);
    }

    if let Some(val) = env("SOURCE_ARCHIVE_PATH") {
        config.source.archive_path = val;
    }

    if let Some(val) = env("STAGING_ENABLED") {
        config.staging.enabled = val.parse().unwrap_or(config.staging.enabled);
    }
    if let Some(val) = env("STAGING_OUTPUT_DIR") {
        config.staging.output_dir = val;
    }

    if let Some(ref mut pg_config) = config.postgresql {
        if let Some(val) = env("POSTGRESQL_CONNECTION_STRING") {
            pg_config.connection_string = secret_string(val);
        }
        if let Some(val) = env("POSTGRESQL_TABLE_NAME") {
            pg_config.table_name = val;
        }
        if let Some(size) = env("POSTGRESQL_MAX_CONNECTIONS").and_then(|v| v.parse().ok()) {
            pg_config.max_connections = size;
        }
        if let Some(val) = env("POSTGRESQL_SSL_MODE") {
            pg_config.ssl_mode = val;
        }
    }

    if let Some(retries) = env("ORCHESTRATION_RETRIES").and_then(|v| v.parse().ok()) {
        config.orchestration.retries = retries;
    }
    if let Some(delay) = env("ORCHESTRATION_RETRY_DELAY_SECONDS").and_then(|v| v.parse().ok()) {
        config.orchestration.retry_delay_seconds = delay;
    }

    if let Some(val) = env("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(config.logging.local_enabled);
    }
    if let Some(val) = env("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
