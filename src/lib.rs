//! glossa - Help-center translation engine
//!
//! A client-facing internationalization engine: resolves the visitor's
//! preferred language, fetches a translation dictionary through an ordered
//! candidate fallback chain, and turns the served page into a patch set of
//! resolved strings.
//!
//! # Architecture
//!
//! - [`config`] - Configuration management and settings
//! - [`locale`] - Language allow-list, resolution and persisted state
//! - [`loader`] - Dictionary fetching with the candidate fallback chain
//! - [`translator`] - Dotted-key lookup and placeholder substitution
//! - [`page`] - View model of the served page and the patch applier
//! - [`popup`] - Mobile tab-to-popup adapter
//! - [`session`] - Orchestration of resolution, loading and applying
//!
//! # Example
//!
//! ```no_run
//! use glossa::config::Config;
//! use glossa::locale::store::PageUrl;
//! use glossa::page::PageModel;
//! use glossa::session::Session;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let url = PageUrl::parse("https://help.example.com/?lang=ru")?;
//!     let mut session = Session::init(&config, url).await?;
//!
//!     let mut page = PageModel::scan("<html>...</html>");
//!     let patches = session.apply(&mut page);
//!     println!("{}", serde_json::to_string_pretty(&patches)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod locale;
pub mod page;
pub mod popup;
pub mod session;
pub mod translator;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::loader::{CandidateSource, DictionaryLoader, LoadOutcome};
    pub use crate::locale::store::{PageUrl, PrefStore};
    pub use crate::locale::{resolve, Language};
    pub use crate::page::apply::{Patch, PatchSet};
    pub use crate::page::PageModel;
    pub use crate::popup::{PopupAction, PopupAdapter};
    pub use crate::session::Session;
    pub use crate::translator::{Dictionary, Translator};
}

// Direct re-exports for convenience
pub use locale::Language;
pub use session::Session;
