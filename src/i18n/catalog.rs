//! Embedded string tables with fallback to the default locale.

use std::collections::HashMap;

use thiserror::Error;

use super::{interpolate, Translate, DEFAULT_LOCALE};

/// Tables compiled into the binary: (locale, TOML source).
const BUILTIN_TABLES: [(&str, &str); 2] = [
    ("fr", include_str!("../../locales/fr.toml")),
    ("en", include_str!("../../locales/en.toml")),
];

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("Failed to parse string table for '{locale}'")]
    Parse {
        locale: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Entry '{key}' in '{locale}' is not a string")]
    InvalidEntry { locale: String, key: String },

    #[error("No string table for the default locale '{0}'")]
    MissingDefault(String),
}

type Table = HashMap<String, String>;

/// All loaded string tables plus the active locale.
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: String,
    tables: HashMap<String, Table>,
}

impl Catalog {
    /// Load the built-in tables and activate `locale`.
    pub fn builtin(locale: &str) -> Result<Self, LocaleError> {
        Self::from_sources(&BUILTIN_TABLES, locale)
    }

    /// Load tables from TOML sources. The default locale must be among them.
    pub fn from_sources(sources: &[(&str, &str)], locale: &str) -> Result<Self, LocaleError> {
        let mut tables = HashMap::new();
        for (name, source) in sources {
            let parsed: toml::Table = toml::from_str(source).map_err(|e| LocaleError::Parse {
                locale: name.to_string(),
                source: e,
            })?;
            let mut table = Table::new();
            flatten(name, "", &parsed, &mut table)?;
            tables.insert(name.to_string(), table);
        }

        if !tables.contains_key(DEFAULT_LOCALE) {
            return Err(LocaleError::MissingDefault(DEFAULT_LOCALE.to_string()));
        }

        if !tables.contains_key(locale) {
            tracing::debug!(
                "No string table for '{}', using '{}'",
                locale,
                DEFAULT_LOCALE
            );
        }

        Ok(Self {
            locale: locale.to_string(),
            tables,
        })
    }

    /// The requested locale (which may have no table of its own).
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Locales with a string table, sorted.
    pub fn available_locales(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.tables
            .get(&self.locale)
            .and_then(|t| t.get(key))
            .or_else(|| self.tables.get(DEFAULT_LOCALE).and_then(|t| t.get(key)))
            .map(String::as_str)
    }
}

impl Translate for Catalog {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        match self.lookup(key) {
            Some(template) => interpolate(template, params),
            None => {
                tracing::debug!("Missing translation for '{}'", key);
                key.to_string()
            }
        }
    }
}

/// Flatten nested TOML tables into dotted keys.
fn flatten(
    locale: &str,
    prefix: &str,
    table: &toml::Table,
    out: &mut Table,
) -> Result<(), LocaleError> {
    for (k, v) in table {
        let key = if prefix.is_empty() {
            k.clone()
        } else {
            format!("{}.{}", prefix, k)
        };
        match v {
            toml::Value::String(s) => {
                out.insert(key, s.clone());
            }
            toml::Value::Table(nested) => flatten(locale, &key, nested, out)?,
            _ => {
                return Err(LocaleError::InvalidEntry {
                    locale: locale.to_string(),
                    key,
                })
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_load() {
        let catalog = Catalog::builtin("fr").unwrap();
        assert_eq!(catalog.available_locales(), vec!["en", "fr"]);
        assert_eq!(catalog.t("discussions.title"), "Discussions");
    }

    #[test]
    fn test_nested_keys_flattened() {
        let catalog = Catalog::builtin("fr").unwrap();
        assert_eq!(catalog.t("settings.sections.server"), "SERVEUR");
    }

    #[test]
    fn test_active_locale_wins() {
        let catalog = Catalog::builtin("en").unwrap();
        assert_eq!(catalog.t("tabs.settings"), "Settings");
    }

    #[test]
    fn test_missing_key_falls_back_to_default() {
        // The English table has no [app] section.
        let catalog = Catalog::builtin("en").unwrap();
        assert_eq!(catalog.t("app.name"), "FortressTalk");
    }

    #[test]
    fn test_unknown_locale_uses_default() {
        let catalog = Catalog::builtin("de").unwrap();
        assert_eq!(catalog.locale(), "de");
        assert_eq!(catalog.t("tabs.calls"), "Appels");
    }

    #[test]
    fn test_missing_everywhere_returns_key() {
        let catalog = Catalog::builtin("fr").unwrap();
        assert_eq!(catalog.t("nope.nothing"), "nope.nothing");
    }

    #[test]
    fn test_translate_with_params() {
        let catalog = Catalog::builtin("fr").unwrap();
        let msg = catalog.translate("chat.callFeatureMessage", &[("type", "vidéo")]);
        assert!(msg.starts_with("L'appel vidéo nécessite"));
    }

    #[test]
    fn test_every_english_key_exists_in_default() {
        let catalog = Catalog::builtin("en").unwrap();
        let fr = &catalog.tables["fr"];
        for key in catalog.tables["en"].keys() {
            assert!(fr.contains_key(key), "missing fr key {}", key);
        }
    }

    #[test]
    fn test_missing_default_table() {
        let err = Catalog::from_sources(&[("en", "a = \"b\"")], "en").unwrap_err();
        assert!(matches!(err, LocaleError::MissingDefault(_)));
    }

    #[test]
    fn test_invalid_entry() {
        let err = Catalog::from_sources(&[("fr", "[a]\nb = 3")], "fr").unwrap_err();
        match err {
            LocaleError::InvalidEntry { key, .. } => assert_eq!(key, "a.b"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_error() {
        let err = Catalog::from_sources(&[("fr", "not toml =")], "fr").unwrap_err();
        assert!(matches!(err, LocaleError::Parse { .. }));
    }
}
