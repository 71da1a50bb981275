//! Context menu built from pluggable actions
//!
//! Each entry is a small value implementing [`MenuAction`]: a label, a
//! visibility predicate and an effect. The menu owner registers entries in
//! display order and dispatches clicks by key.

use tracing::{debug, trace};

use crate::error::Result;
use crate::ui::grid_host::GridHost;

/// Trait for a single context menu entry
pub trait MenuAction {
    /// Stable identifier used for dispatch
    fn key(&self) -> &'static str;

    /// User-facing label in the active locale
    fn name(&self) -> String;

    /// Whether the entry should be hidden for the current selection.
    /// Must not mutate anything.
    fn hidden(&self, host: &dyn GridHost) -> bool;

    /// Run the entry's effect
    fn callback(&self, host: &mut dyn GridHost) -> Result<()>;
}

/// Entry as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub key: &'static str,
    pub label: String,
}

/// Outcome of a menu click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuResult {
    /// Callback ran
    Executed,
    /// Entry exists but is hidden for the current selection
    Hidden,
    /// No entry with that key
    NotFound,
}

/// Ordered list of menu actions
pub struct ContextMenu {
    items: Vec<Box<dyn MenuAction>>,
}

impl ContextMenu {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append an entry; entries keep registration order
    pub fn register(&mut self, item: Box<dyn MenuAction>) {
        debug!(target: "context_menu", "Registering menu item '{}'", item.key());
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries that are visible for the host's current selection
    pub fn visible_items(&self, host: &dyn GridHost) -> Vec<MenuEntry> {
        self.items
            .iter()
            .filter(|item| !item.hidden(host))
            .map(|item| MenuEntry {
                key: item.key(),
                label: item.name(),
            })
            .collect()
    }

    /// Run the entry registered under `key` if it is visible
    pub fn execute(&self, key: &str, host: &mut dyn GridHost) -> Result<MenuResult> {
        let Some(item) = self.items.iter().find(|item| item.key() == key) else {
            trace!(target: "context_menu", "No menu item '{}'", key);
            return Ok(MenuResult::NotFound);
        };

        if item.hidden(host) {
            trace!(target: "context_menu", "Menu item '{}' is hidden, ignoring", key);
            return Ok(MenuResult::Hidden);
        }

        debug!(target: "context_menu", "Executing menu item '{}'", key);
        item.callback(host)?;
        Ok(MenuResult::Executed)
    }
}

impl Default for ContextMenu {
    fn default() -> Self {
        Self::new()
    }
}
