//! Phrase lookup for user-facing labels

use std::collections::HashMap;

use tracing::{debug, warn};

/// Label for the "freeze column" context menu item
pub const CONTEXTMENU_ITEMS_FREEZE_COLUMN: &str = "ContextMenu:items.freezeColumn";

/// Label for the "unfreeze column" context menu item
pub const CONTEXTMENU_ITEMS_UNFREEZE_COLUMN: &str = "ContextMenu:items.unfreezeColumn";

pub const DEFAULT_LOCALE: &str = "en-US";

/// Locale lookup service handed to menu actions
pub trait Translator {
    /// Translate a phrase key; unknown keys come back unchanged
    fn translate(&self, key: &str) -> String;

    /// Active locale code
    fn locale(&self) -> &str;
}

/// Translator backed by built-in phrase tables
#[derive(Debug, Clone)]
pub struct PhraseBook {
    locale: String,
    phrases: HashMap<&'static str, &'static str>,
}

impl PhraseBook {
    /// Load the phrase table for `locale`, falling back to en-US
    pub fn new(locale: &str) -> Self {
        let (locale, table) = match Self::table_for(locale) {
            Some(table) => (locale.to_string(), table),
            None => {
                warn!(target: "i18n", "Unknown locale '{}', falling back to {}", locale, DEFAULT_LOCALE);
                (DEFAULT_LOCALE.to_string(), EN_US)
            }
        };

        debug!(target: "i18n", "Loaded {} phrases for {}", table.len(), locale);

        Self {
            locale,
            phrases: table.iter().copied().collect(),
        }
    }

    fn table_for(locale: &str) -> Option<&'static [(&'static str, &'static str)]> {
        match locale {
            "en-US" => Some(EN_US),
            "de-DE" => Some(DE_DE),
            _ => None,
        }
    }
}

impl Default for PhraseBook {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

impl Translator for PhraseBook {
    fn translate(&self, key: &str) -> String {
        self.phrases
            .get(key)
            .map(|phrase| phrase.to_string())
            .unwrap_or_else(|| key.to_string())
    }

    fn locale(&self) -> &str {
        &self.locale
    }
}

const EN_US: &[(&str, &str)] = &[
    (CONTEXTMENU_ITEMS_FREEZE_COLUMN, "Freeze column"),
    (CONTEXTMENU_ITEMS_UNFREEZE_COLUMN, "Unfreeze column"),
];

const DE_DE: &[(&str, &str)] = &[
    (CONTEXTMENU_ITEMS_FREEZE_COLUMN, "Spalte fixieren"),
    (CONTEXTMENU_ITEMS_UNFREEZE_COLUMN, "Fixierung der Spalte aufheben"),
];
