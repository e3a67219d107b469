//! Dotted-key translation with fail-open placeholder substitution
//!
//! A [`Dictionary`] is an arbitrarily nested JSON object loaded wholesale
//! per language and replaced on each switch; its shape is never validated
//! (missing keys are tolerated at lookup time). The [`Translator`] resolves
//! dotted keys such as `meta.title` against it and substitutes `{{name}}`
//! placeholders from caller-supplied parameters.
//!
//! Unresolvable keys are returned verbatim: the raw key showing up in the
//! page is the intended, non-crashing degradation signal.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;

lazy_static! {
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{\{(\w+)\}\}").expect("invalid placeholder pattern");
}

/// A per-language translation dictionary
///
/// Thin wrapper over a nested JSON value. Empty until the first successful
/// load; always swapped as a whole, never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary(Value);

impl Dictionary {
    /// An empty dictionary, the state before any load succeeds
    #[must_use]
    pub fn empty() -> Self {
        Self(Value::Object(serde_json::Map::new()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    /// Descend the nesting along a dotted key
    ///
    /// Returns `None` as soon as a path step is missing or the current
    /// level is not traversable (e.g. a string mid-path).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut current = &self.0;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for Dictionary {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Named parameters for placeholder substitution
pub type Params = HashMap<String, String>;

/// Resolves dotted keys against the active dictionary
///
/// Owns the dictionary for the lifetime of the current page view; the
/// session replaces it wholesale on every language switch.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    dict: Dictionary,
}

impl Translator {
    #[must_use]
    pub fn new(dict: Dictionary) -> Self {
        Self { dict }
    }

    /// Swap in a freshly loaded dictionary, discarding the previous one
    pub fn replace_dictionary(&mut self, dict: Dictionary) {
        self.dict = dict;
    }

    #[must_use]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// Raw lookup, exposing whether the key resolved at all
    ///
    /// The applier uses this to distinguish a successful lookup from the
    /// key-echo fallback of [`translate`](Self::translate).
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        self.dict.get(key)
    }

    /// Translate a dotted key, substituting `{{name}}` placeholders
    ///
    /// Failure modes, all non-fatal:
    /// - missing or non-traversable path: warns and returns the key verbatim;
    /// - non-string leaf: rendered as-is (numbers, booleans, raw JSON);
    /// - placeholder with no matching parameter: left verbatim (fail-open),
    ///   so malformed params never corrupt unrelated text.
    #[must_use]
    pub fn translate(&self, key: &str, params: Option<&Params>) -> String {
        match self.lookup(key) {
            None | Some(Value::Null) => {
                tracing::warn!(key, "translation key not found");
                key.to_string()
            }
            Some(Value::String(text)) => substitute(text, params),
            Some(other) => other.to_string(),
        }
    }

    /// Shorthand for a parameterless translation
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.translate(key, None)
    }
}

/// Replace each `{{name}}` with `params["name"]`, leaving unmatched
/// placeholders untouched
fn substitute(text: &str, params: Option<&Params>) -> String {
    if !text.contains("{{") {
        return text.to_string();
    }

    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| {
            match params.and_then(|p| p.get(&caps[1])) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
