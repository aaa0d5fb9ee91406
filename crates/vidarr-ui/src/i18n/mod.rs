//! Lightweight JSON-backed translations with per-locale bundles.
//!
//! Locale files are flat `key → text` maps; lookups fall back to English
//! and then to the key itself, so partially translated locales degrade
//! gracefully.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Supported locale codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LocaleCode {
    /// English.
    En,
    /// German.
    De,
    /// Spanish.
    Es,
    /// French.
    Fr,
}

/// Locale used when nothing is stored and the browser language is unknown.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::En;

impl LocaleCode {
    /// All supported locales in display order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::En, Self::De, Self::Es, Self::Fr]
    }

    /// BCP-47 language tag for persistence and `lang` attributes.
    #[must_use]
    pub const fn as_lang_tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Es => "es",
            Self::Fr => "fr",
        }
    }

    /// Native display name for the locale picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::De => "Deutsch",
            Self::Es => "Español",
            Self::Fr => "Français",
        }
    }

    /// Parse a stored or navigator language tag, matching on the primary
    /// subtag so `de-AT` resolves to German.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next().unwrap_or(tag);
        match primary.to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "de" => Some(Self::De),
            "es" => Some(Self::Es),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }
}

static BUNDLES: LazyLock<HashMap<LocaleCode, HashMap<String, String>>> = LazyLock::new(|| {
    let sources = [
        (LocaleCode::En, include_str!("locales/en.json")),
        (LocaleCode::De, include_str!("locales/de.json")),
        (LocaleCode::Es, include_str!("locales/es.json")),
        (LocaleCode::Fr, include_str!("locales/fr.json")),
    ];
    sources
        .into_iter()
        .map(|(locale, raw)| (locale, parse_bundle(raw)))
        .collect()
});

fn parse_bundle(raw: &str) -> HashMap<String, String> {
    serde_json::from_str::<HashMap<String, Value>>(raw)
        .map(|map| {
            map.into_iter()
                .filter_map(|(key, value)| value.as_str().map(|text| (key, text.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

/// Per-locale translation lookup handle, shared via yew context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TranslationBundle {
    locale: LocaleCode,
}

impl TranslationBundle {
    /// Create a bundle for `locale`.
    #[must_use]
    pub const fn new(locale: LocaleCode) -> Self {
        Self { locale }
    }

    /// The bundle's locale.
    #[must_use]
    pub const fn locale(&self) -> LocaleCode {
        self.locale
    }

    /// Translated text for `key`, falling back to English and then to the
    /// key itself.
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        lookup(self.locale, key)
            .or_else(|| lookup(DEFAULT_LOCALE, key))
            .unwrap_or_else(|| key.to_string())
    }
}

fn lookup(locale: LocaleCode, key: &str) -> Option<String> {
    BUNDLES
        .get(&locale)
        .and_then(|bundle| bundle.get(key))
        .cloned()
}

/// Substitute the `{count}` placeholder in a translated template.
#[must_use]
pub fn with_count(template: &str, count: usize) -> String {
    template.replace("{count}", &count.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_fall_back_to_english_and_then_the_key() {
        let english = TranslationBundle::new(LocaleCode::En);
        assert_eq!(english.text("nav.dashboard"), "Dashboard");

        let german = TranslationBundle::new(LocaleCode::De);
        // Partially translated locale: untranslated keys use English.
        assert_eq!(german.text("error.network"), english.text("error.network"));
        assert_eq!(german.text("no.such.key"), "no.such.key");
    }

    #[test]
    fn lang_tags_match_on_primary_subtag() {
        assert_eq!(LocaleCode::from_lang_tag("de-AT"), Some(LocaleCode::De));
        assert_eq!(LocaleCode::from_lang_tag("es_MX"), Some(LocaleCode::Es));
        assert_eq!(LocaleCode::from_lang_tag("pt-BR"), None);
    }

    #[test]
    fn count_templates_substitute_the_placeholder() {
        assert_eq!(with_count("Requested {count} episodes", 3), "Requested 3 episodes");
    }
}
