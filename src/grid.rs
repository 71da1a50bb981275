//! In-memory grid wiring the freeze state, selection and context menu together

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::config::config::Config;
use crate::data::events::FreezeSubscriber;
use crate::data::freeze_state::{FreezeOutcome, FreezeStateManager};
use crate::error::Result;
use crate::i18n::{PhraseBook, Translator};
use crate::ui::context_menu::{ContextMenu, MenuEntry, MenuResult};
use crate::ui::freeze_items::{FreezeColumnItem, UnfreezeColumnItem};
use crate::ui::grid_host::{GridHost, GridSettings, SelectionRange};

/// Host-side state handed to menu actions as `&mut dyn GridHost`
pub struct GridView {
    manager: Rc<RefCell<FreezeStateManager>>,
    selection: Option<SelectionRange>,
    render_count: usize,
    overlay_adjust_count: usize,
}

impl GridHost for GridView {
    fn selected_range(&self) -> Option<SelectionRange> {
        self.selection
    }

    fn settings(&self) -> GridSettings {
        let manager = self.manager.borrow();
        GridSettings {
            fixed_columns_left: manager.fixed_columns_left(),
            column_count: manager.column_count(),
        }
    }

    fn render(&mut self) {
        self.render_count += 1;
        debug!(target: "grid", "Render requested (#{})", self.render_count);
    }

    fn adjust_overlays(&mut self, force: bool) {
        self.overlay_adjust_count += 1;
        debug!(target: "grid", "Overlay resize requested (force={})", force);
    }
}

/// A grid of named columns with a freeze-aware context menu
pub struct Grid {
    headers: Vec<String>,
    manager: Rc<RefCell<FreezeStateManager>>,
    menu: ContextMenu,
    view: GridView,
}

impl Grid {
    /// Create a grid with the default translator and both freeze entries registered
    pub fn new(headers: Vec<String>, fixed_columns_left: usize) -> Result<Self> {
        let manager = FreezeStateManager::new(headers.len(), fixed_columns_left)?;
        let translator: Rc<dyn Translator> = Rc::new(PhraseBook::default());
        Ok(Self::assemble(headers, manager, translator, true))
    }

    /// Create a grid from configuration. An oversized boundary is clamped
    /// to the column count.
    pub fn from_config(config: &Config) -> Result<Self> {
        let headers = config.grid.column_headers.clone();
        let mut fixed = config.grid.fixed_columns_left;
        if fixed > headers.len() {
            warn!(target: "grid",
                  "fixed_columns_left={} exceeds {} columns, clamping",
                  fixed, headers.len());
            fixed = headers.len();
        }

        let manager = FreezeStateManager::new(headers.len(), fixed)?
            .with_placement(config.grid.unfreeze_placement);
        let translator: Rc<dyn Translator> = Rc::new(PhraseBook::new(&config.menu.locale));

        Ok(Self::assemble(
            headers,
            manager,
            translator,
            config.menu.show_freeze_items,
        ))
    }

    fn assemble(
        headers: Vec<String>,
        manager: FreezeStateManager,
        translator: Rc<dyn Translator>,
        with_freeze_items: bool,
    ) -> Self {
        let manager = Rc::new(RefCell::new(manager));

        let mut menu = ContextMenu::new();
        if with_freeze_items {
            menu.register(Box::new(FreezeColumnItem::new(
                manager.clone(),
                translator.clone(),
            )));
            menu.register(Box::new(UnfreezeColumnItem::new(
                manager.clone(),
                translator,
            )));
        }

        let view = GridView {
            manager: manager.clone(),
            selection: None,
            render_count: 0,
            overlay_adjust_count: 0,
        };

        Self {
            headers,
            manager,
            menu,
            view,
        }
    }

    pub fn select(&mut self, range: SelectionRange) {
        self.view.selection = Some(range);
    }

    pub fn select_column(&mut self, column: usize) {
        self.select(SelectionRange::column(column));
    }

    pub fn clear_selection(&mut self) {
        self.view.selection = None;
    }

    pub fn selection(&self) -> Option<SelectionRange> {
        self.view.selection
    }

    /// Menu entries visible for the current selection
    pub fn visible_menu_items(&self) -> Vec<MenuEntry> {
        self.menu.visible_items(&self.view)
    }

    /// Click a context menu entry
    pub fn click_menu_item(&mut self, key: &str) -> Result<MenuResult> {
        self.menu.execute(key, &mut self.view)
    }

    pub fn context_menu(&self) -> &ContextMenu {
        &self.menu
    }

    /// Freeze a column directly and redraw if anything moved
    pub fn freeze_column(&mut self, column: usize) -> Result<FreezeOutcome> {
        let outcome = self.manager.borrow_mut().freeze_column(column)?;
        self.refresh_after(outcome);
        Ok(outcome)
    }

    /// Unfreeze a column directly and redraw if anything moved
    pub fn unfreeze_column(&mut self, column: usize) -> Result<FreezeOutcome> {
        let outcome = self.manager.borrow_mut().unfreeze_column(column)?;
        self.refresh_after(outcome);
        Ok(outcome)
    }

    fn refresh_after(&mut self, outcome: FreezeOutcome) {
        if outcome.is_changed() {
            self.view.render();
            self.view.adjust_overlays(true);
        }
    }

    /// Register a listener for freeze changes made through any path
    pub fn subscribe(&mut self, subscriber: Box<dyn FreezeSubscriber>) {
        self.manager.borrow_mut().subscribe(subscriber);
    }

    pub fn manager(&self) -> Ref<'_, FreezeStateManager> {
        self.manager.borrow()
    }

    pub fn settings(&self) -> GridSettings {
        self.view.settings()
    }

    /// Header of the column at a visual position
    pub fn header_at(&self, visual: usize) -> Option<&str> {
        let physical = self.manager.borrow().to_physical(visual)?;
        self.headers.get(physical).map(String::as_str)
    }

    /// Headers in display order
    pub fn display_headers(&self) -> Vec<&str> {
        let manager = self.manager.borrow();
        let headers = manager
            .column_order()
            .visual_order()
            .iter()
            .filter_map(|&physical| self.headers.get(physical).map(String::as_str))
            .collect();
        headers
    }

    /// Headers of the frozen columns, left to right
    pub fn frozen_headers(&self) -> Vec<&str> {
        let fixed = self.manager.borrow().fixed_columns_left();
        let mut headers = self.display_headers();
        headers.truncate(fixed);
        headers
    }

    pub fn render_count(&self) -> usize {
        self.view.render_count
    }

    pub fn overlay_adjust_count(&self) -> usize {
        self.view.overlay_adjust_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        ["A", "B", "C", "D", "E"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_display_headers_follow_freeze() {
        let mut grid = Grid::new(headers(), 2).unwrap();
        assert_eq!(grid.frozen_headers(), vec!["A", "B"]);

        grid.freeze_column(3).unwrap();
        assert_eq!(grid.display_headers(), vec!["A", "B", "D", "C", "E"]);
        assert_eq!(grid.header_at(2), Some("D"));
        assert_eq!(grid.render_count(), 1);
    }

    #[test]
    fn test_noop_does_not_redraw() {
        let mut grid = Grid::new(headers(), 0).unwrap();
        grid.unfreeze_column(0).unwrap();
        assert_eq!(grid.render_count(), 0);
        assert_eq!(grid.overlay_adjust_count(), 0);
    }

    #[test]
    fn test_from_config_clamps_boundary() {
        let mut config = Config::default();
        config.grid.fixed_columns_left = 9;
        let grid = Grid::from_config(&config).unwrap();
        assert_eq!(grid.settings().fixed_columns_left, 5);
    }

    #[test]
    fn test_clear_selection_hides_menu() {
        let mut grid = Grid::new(headers(), 2).unwrap();
        grid.select_column(1);
        assert_eq!(grid.visible_menu_items().len(), 1);

        grid.clear_selection();
        assert_eq!(grid.selection(), None);
        assert!(grid.visible_menu_items().is_empty());
        assert_eq!(
            grid.click_menu_item(crate::ui::freeze_items::UNFREEZE_COLUMN_KEY)
                .unwrap(),
            MenuResult::Hidden
        );
        assert_eq!(grid.settings().fixed_columns_left, 2);
    }

    #[test]
    fn test_from_config_can_hide_freeze_items() {
        let mut config = Config::default();
        config.menu.show_freeze_items = false;
        let grid = Grid::from_config(&config).unwrap();
        assert!(grid.context_menu().is_empty());
    }
}
