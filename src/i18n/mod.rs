//! Localized strings
//!
//! Screens never hold a global string table; they receive a [`Translate`]
//! implementation so tests can swap in fixed strings.

mod catalog;
mod locale;

pub use catalog::Catalog;
pub use locale::{resolve_locale, DEFAULT_LOCALE};

/// Key -> display string lookup.
pub trait Translate {
    /// Resolve `key` and substitute `%{name}` placeholders from `params`.
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String;

    /// Resolve `key` with no placeholders.
    fn t(&self, key: &str) -> String {
        self.translate(key, &[])
    }
}

/// Replace every `%{name}` in `template` with the matching param.
///
/// Unknown placeholders are left as written.
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() || !template.contains("%{") {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("%{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match params.iter().find(|(k, _)| *k == name) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + end + 1]),
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
pub mod testing {
    use super::Translate;

    /// Echoes the key back, followed by any params, for asserting wiring.
    pub struct KeyEcho;

    impl Translate for KeyEcho {
        fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
            let mut out = key.to_string();
            for (k, v) in params {
                out.push_str(&format!(" {}={}", k, v));
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_basic() {
        assert_eq!(
            interpolate("Appel %{type} !", &[("type", "vidéo")]),
            "Appel vidéo !"
        );
    }

    #[test]
    fn test_interpolate_repeated_and_multiple() {
        assert_eq!(
            interpolate("%{a}-%{b}-%{a}", &[("a", "1"), ("b", "2")]),
            "1-2-1"
        );
    }

    #[test]
    fn test_interpolate_unknown_kept() {
        assert_eq!(
            interpolate("Hi %{who}, %{name}", &[("name", "Bob")]),
            "Hi %{who}, Bob"
        );
    }

    #[test]
    fn test_interpolate_unterminated() {
        assert_eq!(interpolate("oops %{name", &[("name", "x")]), "oops %{name");
    }

    #[test]
    fn test_interpolate_no_params() {
        assert_eq!(interpolate("plain %{x}", &[]), "plain %{x}");
    }

    #[test]
    fn test_key_echo() {
        let tr = testing::KeyEcho;
        assert_eq!(tr.t("chat.ok"), "chat.ok");
        assert_eq!(
            tr.translate("calls.featureMessage", &[("name", "Bob")]),
            "calls.featureMessage name=Bob"
        );
    }
}
