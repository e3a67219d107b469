//! Dictionary loading with an ordered candidate fallback chain
//!
//! Translation files have lived under inconsistent names across partial
//! deployments of the help center, so each language is fetched through an
//! ordered list of candidate URLs with short-circuit on the first success:
//!
//! 1. `/locales/{lang}.json`
//! 2. `/translation-{lang}.json` (only when 1 did not answer with success)
//! 3. `/translation.json`, only for English
//!
//! When every per-language candidate fails for a non-English language, the
//! default English file is fetched as a secondary fallback and adopted
//! as-is: the page then renders English content under a non-English active
//! language. That requested/served divergence is deliberate ("always render
//! something") and is reported on the [`LoadOutcome`] rather than hidden.

use crate::error::{Error, Result};
use crate::locale::Language;
use crate::translator::Dictionary;
use reqwest::Client;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// A named member of the ordered candidate list
///
/// Each source is annotated with the language it actually serves, so a
/// cross-language fallback is a queryable state instead of a control-flow
/// side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateSource {
    /// `/locales/{lang}.json`, the current deployment layout
    LocalesDir,
    /// `/translation-{lang}.json`, the older per-language layout
    SuffixedRoot,
    /// `/translation.json`, the legacy English-only file
    DefaultRoot,
}

impl CandidateSource {
    /// Relative path of this candidate for a requested language
    #[must_use]
    pub fn path(self, lang: Language) -> String {
        match self {
            Self::LocalesDir => format!("/locales/{}.json", lang.code()),
            Self::SuffixedRoot => format!("/translation-{}.json", lang.code()),
            Self::DefaultRoot => "/translation.json".to_string(),
        }
    }

    /// The language this source actually serves
    ///
    /// The legacy root file only ever held English content.
    #[must_use]
    pub fn served_language(self, requested: Language) -> Language {
        match self {
            Self::LocalesDir | Self::SuffixedRoot => requested,
            Self::DefaultRoot => Language::En,
        }
    }
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LocalesDir => "locales-dir",
            Self::SuffixedRoot => "suffixed-root",
            Self::DefaultRoot => "default-root",
        };
        f.write_str(name)
    }
}

/// Result of a successful dictionary load
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// The fetched dictionary, adopted wholesale
    pub dictionary: Dictionary,
    /// Which candidate answered
    pub source: CandidateSource,
    /// The language the caller asked for
    pub requested: Language,
    /// The language the winning source serves
    pub served: Language,
}

impl LoadOutcome {
    /// True when the English secondary fallback kicked in
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.served != self.requested
    }
}

/// Fetches translation dictionaries through the candidate chain
pub struct DictionaryLoader {
    client: Client,
    base_url: String,
}

impl DictionaryLoader {
    /// Create a loader with no request timeout
    ///
    /// A hung request stalls only the switch that issued it; the page stays
    /// interactive. Hosts that want a bound use [`with_timeout`](Self::with_timeout).
    ///
    /// # Errors
    ///
    /// Returns `Error::Http` if the HTTP client cannot be created.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Create a loader with an optional request timeout
    ///
    /// # Errors
    ///
    /// Returns `Error::Http` if the HTTP client cannot be created.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().gzip(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Candidate order for a requested language
    ///
    /// The legacy root file is a regular third candidate for English only;
    /// for other languages it is reserved for the secondary fallback.
    fn candidates(lang: Language) -> &'static [CandidateSource] {
        match lang {
            Language::En => &[
                CandidateSource::LocalesDir,
                CandidateSource::SuffixedRoot,
                CandidateSource::DefaultRoot,
            ],
            Language::Ru => &[CandidateSource::LocalesDir, CandidateSource::SuffixedRoot],
        }
    }

    /// Load the dictionary for a language through the full fallback chain
    ///
    /// Tries each candidate in order, then the English secondary fallback
    /// for non-English requests. Individual candidate failures are logged
    /// and absorbed here; only total exhaustion surfaces as
    /// `Error::AllSourcesFailed`, which the session in turn absorbs (the
    /// previous dictionary stays active).
    pub async fn load(&self, lang: Language) -> Result<LoadOutcome> {
        for &source in Self::candidates(lang) {
            match self.fetch_candidate(source, lang).await {
                Ok(dictionary) => {
                    tracing::debug!(%lang, %source, "dictionary candidate succeeded");
                    return Ok(LoadOutcome {
                        dictionary,
                        source,
                        requested: lang,
                        served: source.served_language(lang),
                    });
                }
                Err(err) => {
                    tracing::error!(%lang, %source, error = %err, "dictionary candidate failed");
                }
            }
        }

        if lang != Language::En {
            tracing::error!(%lang, "all candidates failed, trying default English dictionary");
            match self
                .fetch_candidate(CandidateSource::DefaultRoot, lang)
                .await
            {
                Ok(dictionary) => {
                    return Ok(LoadOutcome {
                        dictionary,
                        source: CandidateSource::DefaultRoot,
                        requested: lang,
                        served: Language::En,
                    });
                }
                Err(err) => {
                    tracing::error!(%lang, error = %err, "English fallback dictionary failed");
                }
            }
        }

        Err(Error::AllSourcesFailed { requested: lang })
    }

    /// Fetch and parse a single candidate
    ///
    /// A non-success status or a JSON parse failure counts as this
    /// candidate's failure and moves the chain along.
    async fn fetch_candidate(
        &self,
        source: CandidateSource,
        lang: Language,
    ) -> Result<Dictionary> {
        let url = format!("{}{}", self.base_url, source.path(lang));
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::CandidateStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        Ok(Dictionary::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_paths() {
        assert_eq!(
            CandidateSource::LocalesDir.path(Language::Ru),
            "/locales/ru.json"
        );
        assert_eq!(
            CandidateSource::SuffixedRoot.path(Language::En),
            "/translation-en.json"
        );
        assert_eq!(
            CandidateSource::DefaultRoot.path(Language::Ru),
            "/translation.json"
        );
    }

    #[test]
    fn test_candidate_order_per_language() {
        let en = DictionaryLoader::candidates(Language::En);
        assert_eq!(en.last(), Some(&CandidateSource::DefaultRoot));
        assert_eq!(en.len(), 3);

        // The legacy root file is not a regular candidate for Russian.
        let ru = DictionaryLoader::candidates(Language::Ru);
        assert!(!ru.contains(&CandidateSource::DefaultRoot));
        assert_eq!(ru.len(), 2);
    }

    #[test]
    fn test_served_language_annotation() {
        assert_eq!(
            CandidateSource::LocalesDir.served_language(Language::Ru),
            Language::Ru
        );
        assert_eq!(
            CandidateSource::DefaultRoot.served_language(Language::Ru),
            Language::En
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let loader = DictionaryLoader::new("http://localhost:8080/").unwrap();
        assert_eq!(loader.base_url, "http://localhost:8080");
    }
}
