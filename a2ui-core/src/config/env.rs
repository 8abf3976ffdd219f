//! Environment variable interpolation for configuration files

use super::error::ConfigError;
use regex::{Captures, Regex};
use std::env;
use std::sync::LazyLock;

/// `${VAR}` or `${VAR:-fallback}`
static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}").expect("env var pattern must compile")
});

/// Replace every environment placeholder in `content`.
///
/// A placeholder without a fallback whose variable is unset fails with
/// [`ConfigError::UnsetPlaceholder`] naming the first such variable.
pub fn interpolate_env_vars(content: &str) -> Result<String, ConfigError> {
    let mut missing: Option<String> = None;

    let result = ENV_VAR_PATTERN.replace_all(content, |cap: &Captures| {
        let var_name = &cap[1];
        match (env::var(var_name), cap.get(2)) {
            (Ok(value), _) => value,
            (Err(_), Some(fallback)) => fallback.as_str().to_string(),
            (Err(_), None) => {
                missing.get_or_insert_with(|| var_name.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(var) => Err(ConfigError::UnsetPlaceholder { var }),
        None => Ok(result.into_owned()),
    }
}

/// Names of all variables referenced in `content`, in order of appearance
pub fn referenced_vars(content: &str) -> Vec<String> {
    ENV_VAR_PATTERN
        .captures_iter(content)
        .map(|cap| cap[1].to_string())
        .collect()
}
