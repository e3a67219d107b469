//! Language resolution for the help-center page
//!
//! The page supports a closed set of languages. The active language is
//! resolved from three environment inputs in strict precedence order:
//! URL query parameter, saved preference, then the host locale.
//!
//! # Usage
//!
//! ```rust
//! use glossa::locale::{resolve, Language};
//!
//! let lang = resolve(Some("ru"), None, Some("en-US"));
//! assert_eq!(lang, Language::Ru);
//! ```

pub mod store;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// A language code from the closed allow-list
///
/// Anything outside this set is rejected at the boundary; code that holds a
/// `Language` can rely on it being supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (default)
    En,
    /// Russian
    Ru,
}

/// The language served when nothing else matches
pub const DEFAULT_LANGUAGE: Language = Language::En;

impl Language {
    /// All supported languages, in switcher display order
    pub const ALL: [Language; 2] = [Language::En, Language::Ru];

    /// The two-letter code used in URLs, file names and the `lang` attribute
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
        }
    }

    /// Parse a code against the allow-list
    ///
    /// Returns `None` for anything outside the supported set. Regional
    /// normalization (`bg` -> `ru`) is deliberately *not* applied here; see
    /// [`normalize`].
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" => Some(Self::En),
            "ru" => Some(Self::Ru),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
            .ok_or_else(|| crate::error::Error::config(format!("unsupported language code: {s}")))
    }
}

/// Apply the hard-coded regional fallback rule
///
/// Bulgarian visitors are served the Russian dictionary, so an incoming `bg`
/// becomes `ru` before the allow-list check. Every other code passes through
/// unchanged (lowercased) and stands or falls on the allow-list alone.
#[must_use]
pub fn normalize(code: &str) -> Cow<'_, str> {
    let lower = code.trim().to_lowercase();
    if lower == "bg" {
        Cow::Borrowed("ru")
    } else if lower == code {
        Cow::Borrowed(code)
    } else {
        Cow::Owned(lower)
    }
}

/// Resolve the active language from the three environment inputs
///
/// Precedence: `url_lang` if allow-listed, else `saved_lang` if allow-listed,
/// else `Ru` when the host locale starts with `ru` (case-insensitive),
/// defaulting to English. Pure function, never fails.
#[must_use]
pub fn resolve(
    url_lang: Option<&str>,
    saved_lang: Option<&str>,
    system_locale: Option<&str>,
) -> Language {
    if let Some(lang) = url_lang.and_then(Language::from_code) {
        return lang;
    }

    if let Some(lang) = saved_lang.and_then(Language::from_code) {
        return lang;
    }

    match system_locale {
        Some(locale) if locale.to_lowercase().starts_with("ru") => Language::Ru,
        _ => DEFAULT_LANGUAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_param_wins_over_everything() {
        for lang in [Language::En, Language::Ru] {
            let resolved = resolve(Some(lang.code()), Some("en"), Some("ru-RU"));
            assert_eq!(resolved, lang);
        }
    }

    #[test]
    fn test_unknown_url_param_falls_through() {
        let resolved = resolve(Some("fr"), None, Some("en-US"));
        assert_eq!(resolved, Language::En);
    }

    #[test]
    fn test_saved_preference_wins_over_locale() {
        let resolved = resolve(None, Some("ru"), Some("en-US"));
        assert_eq!(resolved, Language::Ru);
    }

    #[test]
    fn test_invalid_saved_preference_ignored() {
        let resolved = resolve(None, Some("kr"), Some("en-US"));
        assert_eq!(resolved, Language::En);
    }

    #[test]
    fn test_russian_system_locale() {
        assert_eq!(resolve(None, None, Some("ru-RU")), Language::Ru);
        assert_eq!(resolve(None, None, Some("RU")), Language::Ru);
        assert_eq!(resolve(None, None, Some("ru")), Language::Ru);
    }

    #[test]
    fn test_default_language() {
        assert_eq!(resolve(None, None, None), Language::En);
        assert_eq!(resolve(None, None, Some("de-DE")), Language::En);
    }

    #[test]
    fn test_normalize_bulgarian() {
        assert_eq!(normalize("bg"), "ru");
        assert_eq!(normalize("BG"), "ru");
        assert_eq!(normalize("ru"), "ru");
        assert_eq!(normalize("fr"), "fr");
    }

    #[test]
    fn test_bulgarian_is_not_accepted_by_allow_list() {
        // Normalization is the switch path's job; the resolver rejects bg.
        assert_eq!(Language::from_code("bg"), None);
        assert_eq!(resolve(Some("bg"), None, Some("en-US")), Language::En);
    }

    #[test]
    fn test_from_code_case_insensitive() {
        assert_eq!(Language::from_code("EN"), Some(Language::En));
        assert_eq!(Language::from_code(" ru "), Some(Language::Ru));
    }

    #[test]
    fn test_display_matches_code() {
        assert_eq!(Language::Ru.to_string(), "ru");
        assert_eq!(Language::En.to_string(), "en");
    }
}
