//! Mobile popup behavior for the navigation tabs
//!
//! Below a viewport-width breakpoint the help page converts tab navigation
//! into a popup: a tab click is intercepted and the matching content pane's
//! markup is cloned into the popup container. The adapter is unrelated to
//! translation but must be rewired after every apply pass, because HTML
//! patches may have replaced the subtrees the previous wiring pointed at.
//!
//! Rebinding is idempotent through an explicit registry of already-wired
//! element ids: wiring any number of times yields exactly one active
//! handler per tab.

use crate::page::PageModel;
use std::collections::HashSet;

/// Viewport width below which tabs open the popup instead of navigating
pub const DEFAULT_BREAKPOINT_PX: u32 = 768;

/// What a tab click should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupAction {
    /// Let the tab perform its normal navigation
    Navigate,
    /// Suppress navigation and show the popup with this pane markup
    Show { pane_html: String },
}

/// Where a dismissal interaction landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTarget {
    /// The popup's close button
    CloseButton,
    /// The overlay itself (an outside click)
    Overlay,
    /// Somewhere inside the popup body
    PopupBody,
}

/// Tab-to-popup adapter with idempotent wiring
#[derive(Debug, Clone)]
pub struct PopupAdapter {
    breakpoint: u32,
    wired: HashSet<String>,
    visible: bool,
}

impl PopupAdapter {
    #[must_use]
    pub fn new(breakpoint: u32) -> Self {
        Self {
            breakpoint,
            wired: HashSet::new(),
            visible: false,
        }
    }

    /// Register the page's tabs for click interception
    ///
    /// Returns the ids newly bound by this call; already-wired tabs are
    /// skipped, so repeated wiring never stacks handlers. Silently no-ops
    /// when the popup container or the tab-content wrapper is absent.
    pub fn wire(&mut self, page: &PageModel) -> Vec<String> {
        if !page.has_popup_container || !page.has_tab_content {
            return Vec::new();
        }

        let mut bound = Vec::new();
        for tab in &page.tabs {
            if self.wired.insert(tab.element_id.clone()) {
                bound.push(tab.element_id.clone());
            }
        }
        bound
    }

    /// Decide what a click on a tab does at the given viewport width
    ///
    /// At or above the breakpoint, and for tabs that were never wired or
    /// have no matching pane, the click falls through to normal navigation.
    pub fn on_tab_click(
        &mut self,
        page: &PageModel,
        tab_id: &str,
        viewport_width: u32,
    ) -> PopupAction {
        if viewport_width >= self.breakpoint || !self.wired.contains(tab_id) {
            return PopupAction::Navigate;
        }

        let Some(tab) = page.tabs.iter().find(|t| t.element_id == tab_id) else {
            return PopupAction::Navigate;
        };

        match page.panes.get(&tab.pane_id) {
            Some(pane_html) => {
                self.visible = true;
                PopupAction::Show {
                    pane_html: pane_html.clone(),
                }
            }
            None => {
                tracing::warn!(tab_id, pane_id = %tab.pane_id, "tab points at a missing pane");
                PopupAction::Navigate
            }
        }
    }

    /// Handle a dismissal interaction; returns whether the popup was hidden
    ///
    /// The close button and an outside click (the overlay itself) hide the
    /// popup; clicks inside the popup body do not. Visibility is a single
    /// flag, there is no animation state.
    pub fn on_dismiss(&mut self, target: DismissTarget) -> bool {
        match target {
            DismissTarget::CloseButton | DismissTarget::Overlay => {
                self.visible = false;
                true
            }
            DismissTarget::PopupBody => false,
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Number of tabs currently holding a handler
    #[must_use]
    pub fn wired_count(&self) -> usize {
        self.wired.len()
    }
}

impl Default for PopupAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_BREAKPOINT_PX)
    }
}
