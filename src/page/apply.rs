//! Translation pass over the view model
//!
//! Resolves every slot's key and emits the patch set the page runtime
//! replays. The core policy, kept from the original page behavior: an
//! element is only overwritten when its key actually resolved — a failed
//! lookup leaves the existing content in place instead of blanking it.

use crate::locale::Language;
use crate::page::{Marker, PageModel};
use crate::popup::PopupAdapter;
use crate::translator::Translator;
use serde::Serialize;

/// Dictionary key that, when present, retitles the document
pub const META_TITLE_KEY: &str = "meta.title";

/// One mutation for the page runtime to replay
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Patch {
    SetText { element_id: String, value: String },
    SetHtml { element_id: String, value: String },
    SetAttribute {
        element_id: String,
        name: String,
        value: String,
    },
    SetDocumentTitle { value: String },
    SetDocumentLang { value: String },
    /// Highlight this switcher link as the active language
    MarkActiveSwitcher { element_id: String },
    /// Tab listeners must be rebound: HTML patches may have replaced
    /// subtrees the previous wiring pointed at
    RewirePopup,
}

/// Ordered list of patches produced by one apply pass
pub type PatchSet = Vec<Patch>;

/// Run a full translation pass over the page
///
/// For each slot the key is resolved through the translator; the slot and
/// its patch are only written on a successful lookup (the resolved value
/// differs from the raw key). Afterwards the document title is patched if
/// `meta.title` resolves, the `lang` attribute is always set to the active
/// code, and the popup adapter is always rewired.
pub fn apply(
    page: &mut PageModel,
    translator: &Translator,
    active: Language,
    popup: &mut PopupAdapter,
) -> PatchSet {
    let mut patches = PatchSet::new();

    for slot in &mut page.slots {
        let resolved = translator.t(&slot.key);
        if resolved == slot.key {
            // Unresolved: keep whatever the element already shows.
            continue;
        }

        patches.push(match slot.marker {
            Marker::Text => Patch::SetText {
                element_id: slot.element_id.clone(),
                value: resolved.clone(),
            },
            Marker::Html => Patch::SetHtml {
                element_id: slot.element_id.clone(),
                value: resolved.clone(),
            },
            Marker::Placeholder => Patch::SetAttribute {
                element_id: slot.element_id.clone(),
                name: "placeholder".to_string(),
                value: resolved.clone(),
            },
            Marker::Title => Patch::SetAttribute {
                element_id: slot.element_id.clone(),
                name: "title".to_string(),
                value: resolved.clone(),
            },
        });
        slot.value = Some(resolved);
    }

    if translator.lookup(META_TITLE_KEY).is_some() {
        let title = translator.t(META_TITLE_KEY);
        page.title = Some(title.clone());
        patches.push(Patch::SetDocumentTitle { value: title });
    }

    let code = active.code().to_string();
    page.lang_attr = Some(code.clone());
    patches.push(Patch::SetDocumentLang { value: code });

    let bound = popup.wire(page);
    if !bound.is_empty() {
        tracing::debug!(tabs = bound.len(), "popup tabs wired");
    }
    patches.push(Patch::RewirePopup);

    patches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::Dictionary;
    use serde_json::json;

    const PAGE: &str = r#"<html lang="en"><head><title>Old</title></head><body>
  <h1 id="heading" data-i18n="help.heading">Welcome</h1>
  <p id="missing" data-i18n="help.gone">Existing text</p>
  <div id="intro" data-i18n-html="help.intro"><p>Old intro</p></div>
  <input id="search" data-i18n-placeholder="help.search" placeholder="Search...">
</body></html>"#;

    fn translator() -> Translator {
        Translator::new(Dictionary::from(json!({
            "meta": { "title": "Help Center" },
            "help": {
                "heading": "Справка",
                "intro": "<p>Новое вступление</p>",
                "search": "Поиск"
            }
        })))
    }

    #[test]
    fn test_apply_patches_resolved_slots() {
        let mut page = PageModel::scan(PAGE);
        let mut popup = PopupAdapter::default();
        let patches = apply(&mut page, &translator(), Language::Ru, &mut popup);

        assert!(patches.contains(&Patch::SetText {
            element_id: "heading".to_string(),
            value: "Справка".to_string(),
        }));
        assert!(patches.contains(&Patch::SetHtml {
            element_id: "intro".to_string(),
            value: "<p>Новое вступление</p>".to_string(),
        }));
        assert!(patches.contains(&Patch::SetAttribute {
            element_id: "search".to_string(),
            name: "placeholder".to_string(),
            value: "Поиск".to_string(),
        }));
    }

    #[test]
    fn test_failed_lookup_never_blanks_content() {
        let mut page = PageModel::scan(PAGE);
        let before = page
            .slots
            .iter()
            .find(|s| s.element_id == "missing")
            .unwrap()
            .value
            .clone();

        let mut popup = PopupAdapter::default();
        let patches = apply(&mut page, &translator(), Language::Ru, &mut popup);

        let after = page
            .slots
            .iter()
            .find(|s| s.element_id == "missing")
            .unwrap();
        assert_eq!(after.value, before);
        assert!(!patches
            .iter()
            .any(|p| matches!(p, Patch::SetText { element_id, .. } if element_id == "missing")));
    }

    #[test]
    fn test_meta_title_and_lang_attr() {
        let mut page = PageModel::scan(PAGE);
        let mut popup = PopupAdapter::default();
        let patches = apply(&mut page, &translator(), Language::Ru, &mut popup);

        assert!(patches.contains(&Patch::SetDocumentTitle {
            value: "Help Center".to_string(),
        }));
        assert!(patches.contains(&Patch::SetDocumentLang {
            value: "ru".to_string(),
        }));
        assert_eq!(page.title.as_deref(), Some("Help Center"));
        assert_eq!(page.lang_attr.as_deref(), Some("ru"));
    }

    #[test]
    fn test_no_meta_title_leaves_document_title() {
        let mut page = PageModel::scan(PAGE);
        let translator = Translator::new(Dictionary::from(json!({ "help": {} })));
        let mut popup = PopupAdapter::default();
        let patches = apply(&mut page, &translator, Language::En, &mut popup);

        assert_eq!(page.title.as_deref(), Some("Old"));
        assert!(!patches
            .iter()
            .any(|p| matches!(p, Patch::SetDocumentTitle { .. })));
        // The lang attribute is always written.
        assert!(patches.contains(&Patch::SetDocumentLang {
            value: "en".to_string(),
        }));
    }

    #[test]
    fn test_rewire_is_always_last() {
        let mut page = PageModel::scan(PAGE);
        let mut popup = PopupAdapter::default();
        let patches = apply(&mut page, &translator(), Language::En, &mut popup);
        assert_eq!(patches.last(), Some(&Patch::RewirePopup));
    }

    #[test]
    fn test_empty_dictionary_only_sets_lang() {
        let mut page = PageModel::scan(PAGE);
        let translator = Translator::default();
        let mut popup = PopupAdapter::default();
        let patches = apply(&mut page, &translator, Language::En, &mut popup);

        assert_eq!(
            patches,
            vec![
                Patch::SetDocumentLang {
                    value: "en".to_string()
                },
                Patch::RewirePopup,
            ]
        );
    }
}
