//! "Freeze column" / "Unfreeze column" context menu entries

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::data::freeze_state::FreezeStateManager;
use crate::error::{FreezeError, Result};
use crate::i18n::{Translator, CONTEXTMENU_ITEMS_FREEZE_COLUMN, CONTEXTMENU_ITEMS_UNFREEZE_COLUMN};
use crate::ui::context_menu::MenuAction;
use crate::ui::grid_host::GridHost;

pub const FREEZE_COLUMN_KEY: &str = "freeze_column";
pub const UNFREEZE_COLUMN_KEY: &str = "unfreeze_column";

/// Pins the selected column to the right edge of the frozen block
pub struct FreezeColumnItem {
    manager: Rc<RefCell<FreezeStateManager>>,
    translator: Rc<dyn Translator>,
}

impl FreezeColumnItem {
    pub fn new(manager: Rc<RefCell<FreezeStateManager>>, translator: Rc<dyn Translator>) -> Self {
        Self {
            manager,
            translator,
        }
    }
}

impl MenuAction for FreezeColumnItem {
    fn key(&self) -> &'static str {
        FREEZE_COLUMN_KEY
    }

    fn name(&self) -> String {
        self.translator.translate(CONTEXTMENU_ITEMS_FREEZE_COLUMN)
    }

    fn hidden(&self, host: &dyn GridHost) -> bool {
        let Some(column) = host.selected_range().and_then(|s| s.single_column()) else {
            return true;
        };
        let settings = host.settings();
        column < settings.fixed_columns_left || column >= settings.column_count
    }

    fn callback(&self, host: &mut dyn GridHost) -> Result<()> {
        let Some(selection) = host.selected_range() else {
            warn!(target: "context_menu", "freeze_column invoked without a selection");
            return Err(FreezeError::NoSelection(FREEZE_COLUMN_KEY));
        };

        let outcome = self.manager.borrow_mut().freeze_column(selection.from.col)?;
        debug!(target: "context_menu", "freeze_column({}) -> {:?}", selection.from.col, outcome);

        host.render();
        host.adjust_overlays(true);
        Ok(())
    }
}

/// Moves the selected frozen column back into the scrollable area
pub struct UnfreezeColumnItem {
    manager: Rc<RefCell<FreezeStateManager>>,
    translator: Rc<dyn Translator>,
}

impl UnfreezeColumnItem {
    pub fn new(manager: Rc<RefCell<FreezeStateManager>>, translator: Rc<dyn Translator>) -> Self {
        Self {
            manager,
            translator,
        }
    }
}

impl MenuAction for UnfreezeColumnItem {
    fn key(&self) -> &'static str {
        UNFREEZE_COLUMN_KEY
    }

    fn name(&self) -> String {
        self.translator.translate(CONTEXTMENU_ITEMS_UNFREEZE_COLUMN)
    }

    /// Visible only for a single selected column that is currently frozen
    fn hidden(&self, host: &dyn GridHost) -> bool {
        match host.selected_range().and_then(|s| s.single_column()) {
            Some(column) => column >= host.settings().fixed_columns_left,
            None => true,
        }
    }

    fn callback(&self, host: &mut dyn GridHost) -> Result<()> {
        let Some(selection) = host.selected_range() else {
            warn!(target: "context_menu", "unfreeze_column invoked without a selection");
            return Err(FreezeError::NoSelection(UNFREEZE_COLUMN_KEY));
        };

        let outcome = self
            .manager
            .borrow_mut()
            .unfreeze_column(selection.from.col)?;
        debug!(target: "context_menu", "unfreeze_column({}) -> {:?}", selection.from.col, outcome);

        host.render();
        host.adjust_overlays(true);
        Ok(())
    }
}
