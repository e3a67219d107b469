//! Session: the single coordinating context for language state
//!
//! The original page kept the current language and dictionary as
//! process-wide mutable globals. Here all of that state lives in one
//! [`Session`] and every mutation funnels through [`Session::switch_language`],
//! making the concurrency policy explicit: the host drives the session from
//! its single UI thread, overlapping switches resolve last-write-wins on
//! the dictionary and the language record, and in-flight fetches are never
//! cancelled.
//!
//! The session tracks the *requested* (active) and *rendered* languages
//! separately. After an English secondary fallback the two diverge — the
//! page shows English content under a non-English active code. That
//! divergence is inherited page behavior, kept queryable through
//! [`Session::rendered_language`] rather than silently reconciled.

use crate::config::Config;
use crate::error::Result;
use crate::loader::DictionaryLoader;
use crate::locale::store::{PageUrl, PrefStore};
use crate::locale::{self, Language};
use crate::page::apply::{self, Patch, PatchSet};
use crate::page::PageModel;
use crate::popup::PopupAdapter;
use crate::translator::Translator;

/// Coordinating context for the page's translation state
pub struct Session {
    /// The requested language; always on the allow-list
    active: Language,
    /// The language of the content actually served, once a load succeeded
    rendered: Option<Language>,
    translator: Translator,
    loader: DictionaryLoader,
    prefs: PrefStore,
    page_url: PageUrl,
    popup: PopupAdapter,
}

impl Session {
    /// Initialize the session on page-ready, detecting the host locale
    ///
    /// # Errors
    ///
    /// Fails only on setup problems (HTTP client construction); dictionary
    /// load failures are absorbed per the "always render something" policy.
    pub async fn init(config: &Config, page_url: PageUrl) -> Result<Self> {
        let system_locale = sys_locale::get_locale();
        Self::init_with(config, page_url, system_locale.as_deref()).await
    }

    /// Initialize with an explicit system locale (testable entry point)
    ///
    /// Resolves the initial language from the URL parameter, the stored
    /// preference and the given locale, then loads its dictionary. A stored
    /// code outside the allow-list is ignored here, not rewritten: the
    /// store and URL copies may disagree with memory right after init.
    pub async fn init_with(
        config: &Config,
        page_url: PageUrl,
        system_locale: Option<&str>,
    ) -> Result<Self> {
        let loader =
            DictionaryLoader::with_timeout(&config.endpoints.base_url, config.request_timeout())?;
        let prefs = PrefStore::new(&config.storage.preference_path);

        let saved = prefs.load();
        let url_lang = page_url.lang_param();
        let active = locale::resolve(url_lang.as_deref(), saved.as_deref(), system_locale);

        tracing::info!(%active, "language resolved");

        let mut session = Self {
            active,
            rendered: None,
            translator: Translator::default(),
            loader,
            prefs,
            page_url,
            popup: PopupAdapter::new(config.ui.popup_breakpoint_px),
        };
        session.reload_dictionary().await;
        Ok(session)
    }

    /// The requested language (always allow-listed)
    #[must_use]
    pub fn active_language(&self) -> Language {
        self.active
    }

    /// The language of the dictionary actually in use, if any load succeeded
    ///
    /// Differs from [`active_language`](Self::active_language) after an
    /// English fallback.
    #[must_use]
    pub fn rendered_language(&self) -> Option<Language> {
        self.rendered
    }

    #[must_use]
    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    #[must_use]
    pub fn page_url(&self) -> &PageUrl {
        &self.page_url
    }

    /// The popup adapter, for routing tab clicks and dismissals
    pub fn popup_mut(&mut self) -> &mut PopupAdapter {
        &mut self.popup
    }

    /// Switch the page to another language
    ///
    /// Steps, in order: normalize `bg` to `ru`; reject codes outside the
    /// allow-list (warn, no-op); set the in-memory active language; persist
    /// the preference; await the dictionary load with its full fallback
    /// chain; re-run the applier and switcher update; rewrite the URL's
    /// `lang` parameter in place.
    ///
    /// There is no rollback on partial failure. If the load fell back to
    /// English, `active` still names the requested language while
    /// `rendered` reports English; if the load failed entirely, the
    /// previous dictionary stays on screen.
    pub async fn switch_language(&mut self, code: &str, page: &mut PageModel) -> PatchSet {
        let normalized = locale::normalize(code);
        let Some(lang) = Language::from_code(&normalized) else {
            tracing::warn!(code, "ignoring switch to unsupported language");
            return PatchSet::new();
        };

        tracing::info!(%lang, "switching language");
        self.active = lang;

        if let Err(err) = self.prefs.save(lang) {
            tracing::error!(error = %err, "failed to persist language preference");
        }

        self.reload_dictionary().await;

        let patches = self.apply(page);
        self.page_url.set_lang_param(lang);
        patches
    }

    /// Run a translation pass over the page
    ///
    /// Applies the dictionary, marks the active switcher link and rewires
    /// the popup adapter. Call once on page-ready and after every switch.
    pub fn apply(&mut self, page: &mut PageModel) -> PatchSet {
        let mut patches = apply::apply(page, &self.translator, self.active, &mut self.popup);

        let active_code = self.active.code();
        for link in &page.switcher_links {
            if link.lang.eq_ignore_ascii_case(active_code) {
                patches.push(Patch::MarkActiveSwitcher {
                    element_id: link.element_id.clone(),
                });
            }
        }

        patches
    }

    /// Load the active language's dictionary, absorbing total failure
    ///
    /// On success the dictionary is replaced wholesale and the rendered
    /// language recorded; on total failure the previous dictionary (or the
    /// empty one) stays active and only an error is logged.
    async fn reload_dictionary(&mut self) {
        match self.loader.load(self.active).await {
            Ok(outcome) => {
                if outcome.is_fallback() {
                    tracing::warn!(
                        requested = %outcome.requested,
                        served = %outcome.served,
                        source = %outcome.source,
                        "serving fallback dictionary"
                    );
                }
                self.rendered = Some(outcome.served);
                self.translator.replace_dictionary(outcome.dictionary);
            }
            Err(err) => {
                tracing::error!(
                    lang = %self.active,
                    error = %err,
                    "dictionary load failed, keeping previous dictionary"
                );
            }
        }
    }
}
