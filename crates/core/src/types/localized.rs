//! Localized text for multilingual storefront content.
//!
//! Product color names are stored per-language so the SPA can render the
//! shopper's language directly. French is the store's primary language.

use serde::{Deserialize, Serialize};

/// A short piece of text available in up to three languages.
///
/// Missing languages fall back in the order French, English, Arabic when a
/// single display value is needed (e.g. on order line items).
///
/// ## Examples
///
/// ```
/// use lina_optic_core::LocalizedText;
///
/// let name = LocalizedText {
///     fr: Some("Noir".to_owned()),
///     en: Some("Black".to_owned()),
///     ar: None,
/// };
///
/// assert_eq!(name.get("en"), Some("Black"));
/// assert_eq!(name.get("ar"), None);
/// assert_eq!(name.preferred(), Some("Noir"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// French translation (store default).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fr: Option<String>,
    /// English translation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    /// Arabic translation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar: Option<String>,
}

impl LocalizedText {
    /// Build a value with only the French translation set.
    #[must_use]
    pub fn french(text: impl Into<String>) -> Self {
        Self {
            fr: Some(text.into()),
            en: None,
            ar: None,
        }
    }

    /// Look up the translation for a language code (`"fr"`, `"en"`, `"ar"`).
    ///
    /// Unknown codes return `None`.
    #[must_use]
    pub fn get(&self, lang: &str) -> Option<&str> {
        match lang {
            "fr" => self.fr.as_deref(),
            "en" => self.en.as_deref(),
            "ar" => self.ar.as_deref(),
            _ => None,
        }
    }

    /// The best available translation: French, then English, then Arabic.
    #[must_use]
    pub fn preferred(&self) -> Option<&str> {
        self.fr
            .as_deref()
            .or(self.en.as_deref())
            .or(self.ar.as_deref())
    }

    /// Whether no translation is set at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fr.is_none() && self.en.is_none() && self.ar.is_none()
    }
}
