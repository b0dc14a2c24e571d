use super::App;

use crate::tree_item::{self, visible_rows};

impl App {
    /// Reflattens the visible rows after any tree mutation, keeping the
    /// cursor on the same path where possible.
    pub(crate) fn refresh_rows(&mut self) {
        let keep = self.rows.get(self.selected).map(|r| r.path.clone());
        self.rows = visible_rows(&self.tree);
        self.selected = keep
            .and_then(|p| self.rows.iter().position(|r| r.path == p))
            .unwrap_or_else(|| self.selected.min(self.rows.len().saturating_sub(1)));
    }

    pub(crate) fn toggle_selected_check(&mut self) {
        let Some(idx_path) = self.rows.get(self.selected).map(|r| r.idx_path.clone()) else {
            return;
        };
        tree_item::toggle_check(&mut self.tree, &idx_path);
        self.refresh_rows();
    }

    pub(crate) fn toggle_selected_expand(&mut self) {
        let Some(row) = self.rows.get(self.selected) else {
            return;
        };
        if !row.is_dir {
            return;
        }
        let idx_path = row.idx_path.clone();
        tree_item::toggle_expand(&mut self.tree, &idx_path);
        self.refresh_rows();
    }

    pub(crate) fn expand_selected(&mut self) {
        if self
            .rows
            .get(self.selected)
            .is_some_and(|r| r.is_dir && !r.expanded)
        {
            self.toggle_selected_expand();
        }
    }

    /// Left arrow: collapse an open directory, otherwise jump to the parent.
    pub(crate) fn collapse_or_parent(&mut self) {
        let Some(row) = self.rows.get(self.selected) else {
            return;
        };
        if row.is_dir && row.expanded {
            self.toggle_selected_expand();
            return;
        }
        if let Some(parent) = row.path.parent() {
            if let Some(idx) = self.rows.iter().position(|r| r.path == parent) {
                self.selected = idx;
            }
        }
    }

    /// Maps a terminal row inside the tree pane to a row index, honoring the
    /// current scroll offset.
    pub(crate) fn row_index_at(&self, screen_row: u16) -> Option<usize> {
        let offset = screen_row.checked_sub(self.tree_rect.y)? as usize;
        let idx = self.scroll + offset;
        (idx < self.rows.len()).then_some(idx)
    }
}
