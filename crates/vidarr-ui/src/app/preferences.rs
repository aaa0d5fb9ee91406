//! Persistence and environment helpers for the app shell.

use crate::i18n::{DEFAULT_LOCALE, LocaleCode};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::{document, window};
use serde::Serialize;

pub(crate) const THEME_KEY: &str = "vidarr.theme";
pub(crate) const LOCALE_KEY: &str = "vidarr.locale";
pub(crate) const DENSITY_KEY: &str = "vidarr.density";

/// Colour scheme preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "vidarr-light",
            Self::Dark => "vidarr-dark",
        }
    }

    pub(crate) const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Density preference for tables and cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Density {
    Compact,
    Normal,
    Comfy,
}

impl Density {
    pub(crate) const fn all() -> [Self; 3] {
        [Self::Compact, Self::Normal, Self::Comfy]
    }

    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Normal => "normal",
            Self::Comfy => "comfy",
        }
    }
}

pub(crate) fn load_theme() -> ThemeMode {
    if let Ok(value) = LocalStorage::get::<String>(THEME_KEY) {
        return match value.as_str() {
            "vidarr-light" | "light" => ThemeMode::Light,
            _ => ThemeMode::Dark,
        };
    }
    ThemeMode::Dark
}

pub(crate) fn apply_theme(theme: ThemeMode) {
    if let Some(root) = document().document_element() {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}

pub(crate) fn load_density() -> Density {
    if let Ok(value) = LocalStorage::get::<String>(DENSITY_KEY) {
        return match value.as_str() {
            "compact" => Density::Compact,
            "comfy" => Density::Comfy,
            _ => Density::Normal,
        };
    }
    Density::Normal
}

pub(crate) fn load_locale() -> LocaleCode {
    if let Ok(value) = LocalStorage::get::<String>(LOCALE_KEY) {
        if let Some(locale) = LocaleCode::from_lang_tag(&value) {
            return locale;
        }
    }
    if let Some(tag) = window().navigator().language() {
        if let Some(locale) = LocaleCode::from_lang_tag(&tag) {
            return locale;
        }
    }
    DEFAULT_LOCALE
}

pub(crate) fn set_storage<T: Serialize>(key: &'static str, value: T) {
    if let Err(err) = LocalStorage::set(key, value) {
        log_storage_error("set", key, &err.to_string());
    }
}

fn log_storage_error(operation: &'static str, key: &'static str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}
