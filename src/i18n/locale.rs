//! Locale selection

use std::env;

/// Locale used when nothing else matches, and for missing keys.
pub const DEFAULT_LOCALE: &str = "fr";

/// Environment variables consulted for the user's language, in priority order.
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Extract the language code from a POSIX locale string.
///
/// `"en_US.UTF-8"` -> `"en"`. Returns `None` for `C`/`POSIX` and empty values.
pub fn language_code(raw: &str) -> Option<String> {
    let code = raw
        .split(['_', '.', '@', '-'])
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    if code.is_empty() || code == "c" || code == "posix" {
        None
    } else {
        Some(code)
    }
}

fn detect_from_env() -> Option<String> {
    LOCALE_ENV_VARS
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find_map(|value| language_code(&value))
}

/// Pick the locale: explicit flag, then config, then the environment, then French.
pub fn resolve_locale(flag: Option<&str>, configured: Option<&str>) -> String {
    pick(flag, configured, detect_from_env())
}

fn pick(flag: Option<&str>, configured: Option<&str>, detected: Option<String>) -> String {
    flag.and_then(language_code)
        .or_else(|| configured.and_then(language_code))
        .or(detected)
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}
