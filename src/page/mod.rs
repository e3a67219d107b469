//! Declarative view model of the help-center page
//!
//! Instead of mutating a live DOM, the engine scans the served page HTML
//! once into a [`PageModel`]: every element carrying a translation marker
//! becomes a [`Slot`], plus the page-level title, `lang` attribute,
//! language-switcher links and the popup navigation structure. The applier
//! (see [`apply`]) writes resolved strings into the model and emits a patch
//! set the page runtime replays onto real elements.
//!
//! # DOM contract
//!
//! - `data-i18n` — text content key
//! - `data-i18n-html` — inner markup key
//! - `data-i18n-placeholder` — `placeholder` attribute key
//! - `data-i18n-title` — `title` attribute key
//! - `data-lang` — target code on switcher links
//! - `#tab-content` — wrapper holding the popup content panes
//! - `#mobile-popup` — the popup container element

pub mod apply;

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::collections::HashMap;

/// Element id of the popup container the adapter clones panes into
pub const POPUP_CONTAINER_ID: &str = "mobile-popup";

/// Element id of the wrapper holding the tab content panes
pub const TAB_CONTENT_ID: &str = "tab-content";

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    static ref TITLE: Selector = parse_selector!("title");
    static ref HTML_ROOT: Selector = parse_selector!("html");
    static ref SWITCHER: Selector = parse_selector!("[data-lang]");
    static ref NAV_TAB: Selector = parse_selector!("[data-tab]");
    static ref POPUP_CONTAINER: Selector = parse_selector!("#mobile-popup");
    static ref TAB_CONTENT: Selector = parse_selector!("#tab-content");
    static ref TAB_PANE: Selector = parse_selector!("#tab-content > [id]");
    static ref MARKED_TEXT: Selector = parse_selector!("[data-i18n]");
    static ref MARKED_HTML: Selector = parse_selector!("[data-i18n-html]");
    static ref MARKED_PLACEHOLDER: Selector = parse_selector!("[data-i18n-placeholder]");
    static ref MARKED_TITLE: Selector = parse_selector!("[data-i18n-title]");
}

/// The four translation marker attributes and the element property each
/// one feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Marker {
    /// `data-i18n` -> text content
    Text,
    /// `data-i18n-html` -> inner markup
    Html,
    /// `data-i18n-placeholder` -> `placeholder` attribute
    Placeholder,
    /// `data-i18n-title` -> `title` attribute
    Title,
}

impl Marker {
    /// All markers, in scan order
    pub const ALL: [Marker; 4] = [Marker::Text, Marker::Html, Marker::Placeholder, Marker::Title];

    /// The attribute carrying the dotted key
    #[must_use]
    pub fn attr(self) -> &'static str {
        match self {
            Self::Text => "data-i18n",
            Self::Html => "data-i18n-html",
            Self::Placeholder => "data-i18n-placeholder",
            Self::Title => "data-i18n-title",
        }
    }

    fn selector(self) -> &'static Selector {
        match self {
            Self::Text => &MARKED_TEXT,
            Self::Html => &MARKED_HTML,
            Self::Placeholder => &MARKED_PLACEHOLDER,
            Self::Title => &MARKED_TITLE,
        }
    }
}

/// One marked element: its id, marker, key and current content
///
/// `value` holds whatever the element currently shows; a failed lookup
/// leaves it untouched, so stale-but-present content beats a blank.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    /// The element's `id`, or a synthesized `{marker}:{ordinal}` id for
    /// elements without one (the runtime resolves those by scan order)
    pub element_id: String,
    pub marker: Marker,
    /// Dotted lookup key from the marker attribute
    pub key: String,
    /// Current content of the targeted property
    pub value: Option<String>,
}

/// A language-switcher link (`data-lang`)
#[derive(Debug, Clone, PartialEq)]
pub struct SwitcherLink {
    pub element_id: String,
    /// Raw target code as written in the markup
    pub lang: String,
}

/// A navigation tab pointing at a content pane (`data-tab`)
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub element_id: String,
    /// Id of the pane inside `#tab-content` this tab opens
    pub pane_id: String,
}

/// Scanned view of the served page
#[derive(Debug, Clone, Default)]
pub struct PageModel {
    /// Current document title
    pub title: Option<String>,
    /// Current `lang` attribute on the root element
    pub lang_attr: Option<String>,
    /// All marked elements, in scan order
    pub slots: Vec<Slot>,
    /// Language-switcher links
    pub switcher_links: Vec<SwitcherLink>,
    /// Navigation tabs eligible for popup interception
    pub tabs: Vec<Tab>,
    /// Pane id -> inner markup, cloned into the popup on a tab click
    pub panes: HashMap<String, String>,
    /// Whether the popup container exists on this page
    pub has_popup_container: bool,
    /// Whether the tab-content wrapper exists on this page
    pub has_tab_content: bool,
}

impl PageModel {
    /// Scan a served HTML document into the view model
    #[must_use]
    pub fn scan(html: &str) -> Self {
        let document = Html::parse_document(html);

        let title = document
            .select(&TITLE)
            .next()
            .map(|el| el.text().collect::<String>());

        let lang_attr = document
            .select(&HTML_ROOT)
            .next()
            .and_then(|el| el.value().attr("lang"))
            .map(str::to_string);

        let mut slots = Vec::new();
        for marker in Marker::ALL {
            for (index, element) in document.select(marker.selector()).enumerate() {
                let Some(key) = element.value().attr(marker.attr()) else {
                    continue;
                };
                slots.push(Slot {
                    element_id: element_id(&element, marker.attr(), index),
                    marker,
                    key: key.to_string(),
                    value: current_value(&element, marker),
                });
            }
        }

        let switcher_links = document
            .select(&SWITCHER)
            .enumerate()
            .filter_map(|(index, element)| {
                let lang = element.value().attr("data-lang")?;
                Some(SwitcherLink {
                    element_id: element_id(&element, "data-lang", index),
                    lang: lang.to_string(),
                })
            })
            .collect();

        let tabs = document
            .select(&NAV_TAB)
            .enumerate()
            .filter_map(|(index, element)| {
                let pane_id = element.value().attr("data-tab")?;
                Some(Tab {
                    element_id: element_id(&element, "data-tab", index),
                    pane_id: pane_id.to_string(),
                })
            })
            .collect();

        let panes = document
            .select(&TAB_PANE)
            .filter_map(|element| {
                let id = element.value().attr("id")?;
                Some((id.to_string(), element.inner_html()))
            })
            .collect();

        Self {
            title,
            lang_attr,
            slots,
            switcher_links,
            tabs,
            panes,
            has_popup_container: document.select(&POPUP_CONTAINER).next().is_some(),
            has_tab_content: document.select(&TAB_CONTENT).next().is_some(),
        }
    }
}

fn element_id(element: &ElementRef<'_>, attr: &str, index: usize) -> String {
    match element.value().attr("id") {
        Some(id) => id.to_string(),
        None => format!("{attr}:{index}"),
    }
}

fn current_value(element: &ElementRef<'_>, marker: Marker) -> Option<String> {
    match marker {
        Marker::Text => Some(element.text().collect::<String>()),
        Marker::Html => Some(element.inner_html()),
        Marker::Placeholder => element.value().attr("placeholder").map(str::to_string),
        Marker::Title => element.value().attr("title").map(str::to_string),
    }
}
