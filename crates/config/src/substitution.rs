use anyhow::Result;
use regex::Regex;
use std::env;
use std::sync::OnceLock;
use tracing::{debug, warn};

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\$\{(\w+)(?::-([^}]*))?\}|\$(\w+)").expect("placeholder pattern is valid")
    })
}

/// Substitute environment variables written as `${VAR}`, `${VAR:-default}`
/// or `$VAR`. Unset variables without a default are left in place.
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let mut missing_vars = Vec::new();

    let result = placeholder_regex().replace_all(content, |caps: &regex::Captures<'_>| {
        let placeholder = &caps[0];
        let Some(name) = caps.get(1).or_else(|| caps.get(3)) else {
            return placeholder.to_string();
        };
        let var_name = name.as_str();

        match env::var(var_name) {
            Ok(value) => {
                debug!("Substituting environment variable: {} = \"{}\"", var_name, value);
                value
            }
            Err(_) => match caps.get(2) {
                Some(default) => {
                    debug!("Environment variable '{}' not set, using default", var_name);
                    default.as_str().to_string()
                }
                None => {
                    warn!("Environment variable '{}' not set", var_name);
                    missing_vars.push(var_name.to_string());
                    placeholder.to_string()
                }
            },
        }
    });

    if !missing_vars.is_empty() {
        debug!(
            "Environment variables not set (validation will report them): {:?}",
            missing_vars
        );
    }

    Ok(result.into_owned())
}

/// Check if a string contains unresolved environment variable placeholders
pub fn has_unresolved_env_vars(content: &str) -> bool {
    placeholder_regex().is_match(content)
}
