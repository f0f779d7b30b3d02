//! Localized label lookup.
//!
//! The roster ships English and Turkish labels. A [`Catalog`] maps dotted keys
//! (`table.firstName`) to text per [`Locale`], interpolates `%{name}`
//! placeholders and falls back to the default locale when the active one lacks
//! a key. Consumers depend on the [`Translate`] trait so a different catalog
//! source can be injected.

use crate::domain::error::{Result, RosterError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

const BUILTIN_CATALOG: &str = include_str!("catalog.toml");

/// Supported display languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Tr,
}

impl Locale {
    pub const ALL: [Self; 2] = [Self::En, Self::Tr];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Tr => "tr",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RosterError::InvalidInput(format!("unsupported locale: {s}")))
    }
}

/// Key-to-text lookup for one locale.
pub trait Translate {
    /// Text for `key` in `locale`, with `%{name}` placeholders filled from `params`.
    fn translate(&self, locale: Locale, key: &str, params: &[(&str, &str)]) -> String;
}

/// In-memory label catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    default_locale: Locale,
    entries: HashMap<Locale, HashMap<String, String>>,
}

impl Catalog {
    /// The catalog bundled with the crate, defaulting to Turkish.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Config`] if the bundled catalog does not parse.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG, Locale::default())
    }

    /// Parses a TOML catalog with one top-level table per locale code.
    ///
    /// Nested tables are flattened into dotted keys. Unknown locale codes are
    /// ignored; non-string leaves are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Config`] on malformed TOML or non-string values.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster::i18n::{Catalog, Locale, Translate};
    ///
    /// let catalog = Catalog::from_toml_str("[en.greeting]\nhello = \"Hi %{name}\"", Locale::En)?;
    /// assert_eq!(catalog.translate(Locale::En, "greeting.hello", &[("name", "Ayşe")]), "Hi Ayşe");
    /// # Ok::<(), roster::RosterError>(())
    /// ```
    pub fn from_toml_str(source: &str, default_locale: Locale) -> Result<Self> {
        let root: toml::Table = toml::from_str(source)?;
        let mut entries = HashMap::new();

        for (code, section) in root {
            let Ok(locale) = code.parse::<Locale>() else {
                tracing::debug!(locale = %code, "skipping unsupported locale");
                continue;
            };
            let mut flat = HashMap::new();
            flatten(&code, "", &section, &mut flat)?;
            entries.insert(locale, flat);
        }

        Ok(Self {
            default_locale,
            entries,
        })
    }

    #[must_use]
    pub const fn default_locale(&self) -> Locale {
        self.default_locale
    }

    fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.entries
            .get(&locale)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }
}

impl Translate for Catalog {
    fn translate(&self, locale: Locale, key: &str, params: &[(&str, &str)]) -> String {
        let Some(template) = self
            .lookup(locale, key)
            .or_else(|| self.lookup(self.default_locale, key))
        else {
            tracing::debug!(%locale, key, "missing translation");
            return format!("[missing \"{locale}.{key}\" translation]");
        };

        params.iter().fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("%{{{name}}}"), value)
        })
    }
}

fn flatten(
    code: &str,
    prefix: &str,
    value: &toml::Value,
    out: &mut HashMap<String, String>,
) -> Result<()> {
    match value {
        toml::Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
            Ok(())
        }
        toml::Value::Table(table) => {
            for (name, child) in table {
                let key = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                flatten(code, &key, child, out)?;
            }
            Ok(())
        }
        _ => Err(RosterError::Config(format!(
            "catalog entry {code}.{prefix} must be a string"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_covers_both_locales() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.translate(Locale::En, "table.firstName", &[]), "First Name");
        assert_eq!(catalog.translate(Locale::Tr, "table.firstName", &[]), "Ad");
        assert_eq!(catalog.default_locale(), Locale::Tr);
    }

    #[test]
    fn builtin_locales_have_the_same_keys() {
        let catalog = Catalog::builtin().unwrap();
        let mut en: Vec<_> = catalog.entries[&Locale::En].keys().collect();
        let mut tr: Vec<_> = catalog.entries[&Locale::Tr].keys().collect();
        en.sort();
        tr.sort();
        assert_eq!(en, tr);
    }

    #[test]
    fn interpolates_named_parameters() {
        let catalog = Catalog::builtin().unwrap();
        let text = catalog.translate(Locale::En, "dialog.message", &[("name", "Ayşe Demir")]);
        assert_eq!(text, "Selected Employee record of Ayşe Demir will be deleted");
    }

    #[test]
    fn falls_back_to_default_locale_then_marks_missing() {
        let catalog = Catalog::from_toml_str(
            "[tr.only]\nhere = \"burada\"\n[en.other]\nthing = \"x\"",
            Locale::Tr,
        )
        .unwrap();

        assert_eq!(catalog.translate(Locale::En, "only.here", &[]), "burada");
        assert_eq!(
            catalog.translate(Locale::En, "nope", &[]),
            "[missing \"en.nope\" translation]"
        );
    }

    #[test]
    fn rejects_non_string_leaves() {
        let result = Catalog::from_toml_str("[en]\ncount = 3", Locale::En);
        assert!(matches!(result, Err(RosterError::Config(_))));
    }

    #[test]
    fn parses_locale_codes() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert!("de".parse::<Locale>().is_err());
    }
}
