use super::App;
use std::io;

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::util::inside;

impl App {
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> io::Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (_, KeyCode::Esc)
            | (KeyModifiers::NONE, KeyCode::Char('q')) => {
                self.should_quit = true;
            }
            (KeyModifiers::NONE, KeyCode::Up | KeyCode::Char('k')) => self.select_prev(1),
            (KeyModifiers::NONE, KeyCode::Down | KeyCode::Char('j')) => self.select_next(1),
            (KeyModifiers::NONE, KeyCode::PageUp) => self.select_prev(self.last_viewport.max(1)),
            (KeyModifiers::NONE, KeyCode::PageDown) => self.select_next(self.last_viewport.max(1)),
            (KeyModifiers::NONE, KeyCode::Home) => self.select_first(),
            (KeyModifiers::NONE, KeyCode::End) => self.select_last(),
            (KeyModifiers::NONE, KeyCode::Char(' ')) => self.toggle_selected_check(),
            (KeyModifiers::NONE, KeyCode::Enter) => self.toggle_selected_expand(),
            (KeyModifiers::NONE, KeyCode::Right) => self.expand_selected(),
            (KeyModifiers::NONE, KeyCode::Left) => self.collapse_or_parent(),
            (KeyModifiers::NONE, KeyCode::Char('h')) => self.toggle_hidden(),
            (KeyModifiers::NONE, KeyCode::Char('r')) => self.refresh(),
            (KeyModifiers::NONE, KeyCode::Char('c')) => self.copy_checked(),
            _ => {}
        }
        Ok(())
    }

    pub(crate) fn handle_mouse(&mut self, mouse: MouseEvent) -> io::Result<()> {
        if !inside(mouse.column, mouse.row, self.tree_rect) {
            return Ok(());
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(idx) = self.row_index_at(mouse.row) {
                    self.selected = idx;
                    let row = &self.rows[idx];
                    let col = mouse.column.saturating_sub(self.tree_rect.x) as usize;
                    // The [•] bracket toggles the check; anywhere else on a
                    // directory row toggles expand.
                    if (row.check_start..row.check_start + 3).contains(&col) {
                        self.toggle_selected_check();
                    } else if row.is_dir {
                        self.toggle_selected_expand();
                    }
                }
            }
            MouseEventKind::ScrollDown => self.select_next(1),
            MouseEventKind::ScrollUp => self.select_prev(1),
            _ => {}
        }
        Ok(())
    }
}
