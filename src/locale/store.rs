//! Persisted language preference and URL mirror
//!
//! The active language has two write-through copies besides the in-memory
//! value: a file-backed preference (the localStorage analog) and the `lang`
//! query parameter of the page URL (rewritten in place, no navigation).
//! Both are updated on every explicit switch; right after initialization
//! they may disagree with memory (a stored code outside the allow-list is
//! ignored by the resolver, not rewritten).

use crate::error::{Error, Result};
use crate::locale::Language;
use std::path::{Path, PathBuf};
use url::Url;

/// Query parameter carrying the language on the page URL
pub const LANG_PARAM: &str = "lang";

/// File-backed store for the last explicitly chosen language
///
/// Holds a single raw code. Validation happens at read time in the
/// resolver, so a stale or foreign value degrades to "no preference".
#[derive(Debug, Clone)]
pub struct PrefStore {
    path: PathBuf,
}

impl PrefStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored code, if any
    ///
    /// Returns the raw string; callers run it through the allow-list. A
    /// missing or unreadable file is simply "no preference".
    #[must_use]
    pub fn load(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let code = raw.trim();
        if code.is_empty() {
            None
        } else {
            Some(code.to_string())
        }
    }

    /// Persist the chosen language, creating parent directories as needed
    pub fn save(&self, lang: Language) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::PrefStore(format!(
                        "cannot create {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }
        std::fs::write(&self.path, lang.code())
            .map_err(|e| Error::PrefStore(format!("cannot write {}: {e}", self.path.display())))
    }
}

/// The page URL with its mirrored `lang` query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrl {
    url: Url,
}

impl PageUrl {
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input)
            .map_err(|e| Error::config(format!("invalid page URL '{input}': {e}")))?;
        Ok(Self { url })
    }

    #[must_use]
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// Read the `lang` parameter as the resolver sees it (raw, unvalidated)
    #[must_use]
    pub fn lang_param(&self) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == LANG_PARAM)
            .map(|(_, v)| v.into_owned())
    }

    /// Rewrite the `lang` parameter in place, preserving other parameters
    pub fn set_lang_param(&mut self, lang: Language) {
        let others: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(k, _)| k != LANG_PARAM)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let mut pairs = self.url.query_pairs_mut();
        pairs.clear();
        for (k, v) in &others {
            pairs.append_pair(k, v);
        }
        pairs.append_pair(LANG_PARAM, lang.code());
        drop(pairs);
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pref_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefStore::new(dir.path().join("language"));

        assert_eq!(store.load(), None);

        store.save(Language::Ru).unwrap();
        assert_eq!(store.load(), Some("ru".to_string()));

        store.save(Language::En).unwrap();
        assert_eq!(store.load(), Some("en".to_string()));
    }

    #[test]
    fn test_pref_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefStore::new(dir.path().join("nested/deeper/language"));

        store.save(Language::Ru).unwrap();
        assert_eq!(store.load(), Some("ru".to_string()));
    }

    #[test]
    fn test_lang_param_read() {
        let url = PageUrl::parse("https://help.example.com/?lang=ru&tab=faq").unwrap();
        assert_eq!(url.lang_param(), Some("ru".to_string()));

        let url = PageUrl::parse("https://help.example.com/").unwrap();
        assert_eq!(url.lang_param(), None);
    }

    #[test]
    fn test_set_lang_param_preserves_others() {
        let mut url = PageUrl::parse("https://help.example.com/?tab=faq&lang=en").unwrap();
        url.set_lang_param(Language::Ru);

        assert_eq!(url.lang_param(), Some("ru".to_string()));
        assert!(url.as_str().contains("tab=faq"));
        // Exactly one lang parameter after the rewrite.
        let count = url
            .as_url()
            .query_pairs()
            .filter(|(k, _)| k == LANG_PARAM)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_set_lang_param_on_bare_url() {
        let mut url = PageUrl::parse("https://help.example.com/support").unwrap();
        url.set_lang_param(Language::En);
        assert_eq!(url.lang_param(), Some("en".to_string()));
    }
}
