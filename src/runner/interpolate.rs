//! Variable interpolation for strings
//!
//! This module replaces `${var}` references in task file commands.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::env;
use std::sync::OnceLock;

fn var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid variable pattern"))
}

/// Interpolate variables in a string
///
/// Supports:
/// - `${var}` - variable from `vars`
/// - Environment variables (when not found in `vars`)
///
/// Unknown variables are left as written. Substituted values are not
/// interpolated again.
pub fn interpolate(s: &str, vars: &HashMap<String, String>) -> String {
    var_pattern()
        .replace_all(s, |caps: &Captures| {
            let var_name = &caps[1];

            if let Some(value) = vars.get(var_name) {
                return value.clone();
            }

            if let Ok(value) = env::var(var_name) {
                return value;
            }

            caps[0].to_string()
        })
        .into_owned()
}
