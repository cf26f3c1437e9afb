//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Strings without `${` are returned unchanged, so a bare `$` in a path or
/// URL needs no escaping.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, lookup)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.cause.0),
        })
}

fn lookup(var: &str) -> Result<Option<String>, UnsetVar> {
    std::env::var(var)
        .map(Some)
        .map_err(|_| UnsetVar(var.to_owned()))
}

/// Name of a referenced variable that is not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("MDWIKI_TEST_BASE", "/wiki");
        }
        let result = expand_env("${MDWIKI_TEST_BASE}/docs", "wiki.base_path").unwrap();
        assert_eq!(result, "/wiki/docs");
        unsafe {
            std::env::remove_var("MDWIKI_TEST_BASE");
        }
    }

    #[test]
    fn test_expand_default() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("MDWIKI_TEST_UNSET");
        }
        let result = expand_env("${MDWIKI_TEST_UNSET:-site}", "export.output_dir").unwrap();
        assert_eq!(result, "site");
    }

    #[test]
    fn test_expand_missing_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("MDWIKI_TEST_MISSING");
        }
        let err = expand_env("${MDWIKI_TEST_MISSING}", "wiki.source_dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in wiki.source_dir: ${MDWIKI_TEST_MISSING} not set"
        );
    }

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("docs", "wiki.source_dir").unwrap(), "docs");
        assert_eq!(expand_env("/path/$HOME", "wiki.base_path").unwrap(), "/path/$HOME");
    }
}
