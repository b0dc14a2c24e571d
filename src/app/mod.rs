mod file_tree;
mod input;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use arboard::Clipboard;
use ratatui::layout::Rect;

use crate::theme::Theme;
use crate::tree_item::{self, Row, TreeItem, build_tree};

const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NoticeLevel {
    Ok,
    Warn,
    Error,
}

#[derive(Debug)]
pub(crate) struct Notice {
    pub(crate) text: String,
    pub(crate) level: NoticeLevel,
    since: Instant,
}

pub(crate) struct App {
    pub(crate) root: PathBuf,
    pub(crate) show_hidden: bool,
    pub(crate) tree: TreeItem,
    pub(crate) rows: Vec<Row>,
    pub(crate) selected: usize,
    pub(crate) scroll: usize,
    pub(crate) last_viewport: usize,
    pub(crate) tree_rect: Rect,
    pub(crate) notice: Option<Notice>,
    pub(crate) theme: Theme,
    pub(crate) should_quit: bool,
    clipboard: Option<Clipboard>,
}

impl App {
    pub(crate) fn new(root: PathBuf) -> Self {
        let (tree, skipped) = build_tree(&root, false);
        let mut app = Self {
            root,
            show_hidden: false,
            tree,
            rows: Vec::new(),
            selected: 0,
            scroll: 0,
            last_viewport: 0,
            tree_rect: Rect::default(),
            notice: None,
            theme: Theme::default(),
            should_quit: false,
            clipboard: None,
        };
        app.refresh_rows();
        if skipped > 0 {
            let plural = if skipped == 1 { "entry" } else { "entries" };
            app.set_notice(
                NoticeLevel::Warn,
                format!("Skipped {skipped} unreadable {plural}"),
            );
        }
        app
    }

    pub(crate) fn window_title(&self) -> String {
        let name = self
            .root
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.root.display().to_string());
        format!("Tree: {name}")
    }

    pub(crate) fn view_title(&self) -> String {
        if self.show_hidden {
            format!("{} (hidden files shown)", self.window_title())
        } else {
            self.window_title()
        }
    }

    pub(crate) fn set_notice<S: Into<String>>(&mut self, level: NoticeLevel, text: S) {
        self.notice = Some(Notice {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    /// Drops an expired notice; called once per event-loop tick.
    pub(crate) fn tick(&mut self) {
        if self
            .notice
            .as_ref()
            .is_some_and(|n| n.since.elapsed() >= NOTICE_TTL)
        {
            self.notice = None;
        }
    }

    /// Re-scans the filesystem. The tree is rebuilt from scratch: check and
    /// expand state reset, only the cursor survives (by path, when it still
    /// exists). Unreadable entries are counted and reported, never fatal.
    pub(crate) fn refresh(&mut self) {
        self.notice = None;
        let (tree, skipped) = build_tree(&self.root, self.show_hidden);
        self.tree = tree;
        self.refresh_rows();
        if skipped > 0 {
            let plural = if skipped == 1 { "entry" } else { "entries" };
            self.set_notice(
                NoticeLevel::Warn,
                format!("Skipped {skipped} unreadable {plural}"),
            );
        }
    }

    pub(crate) fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        self.refresh();
    }

    /// Copies the checked subset to the system clipboard. An empty selection
    /// shows "Nothing to copy" and leaves the clipboard untouched.
    pub(crate) fn copy_checked(&mut self) {
        let Some(text) = tree_item::selection_text(&self.tree) else {
            self.set_notice(NoticeLevel::Warn, "Nothing to copy");
            return;
        };
        // The handle stays alive in self: X11 clipboards forget their
        // contents when the owning handle drops.
        let mut clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => match Clipboard::new() {
                Ok(clipboard) => clipboard,
                Err(err) => {
                    self.set_notice(NoticeLevel::Error, format!("Clipboard unavailable: {err}"));
                    return;
                }
            },
        };
        let result = clipboard.set_text(text);
        self.clipboard = Some(clipboard);
        match result {
            Ok(()) => self.set_notice(NoticeLevel::Ok, "Copied!"),
            Err(err) => self.set_notice(NoticeLevel::Error, format!("Copy failed: {err}")),
        }
    }

    pub(crate) fn select_prev(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub(crate) fn select_next(&mut self, n: usize) {
        if !self.rows.is_empty() {
            self.selected = (self.selected + n).min(self.rows.len() - 1);
        }
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }

    /// Keeps the cursor inside the viewport recorded by the last draw.
    pub(crate) fn ensure_visible(&mut self) {
        let height = self.last_viewport.max(1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + height {
            self.scroll = self.selected + 1 - height;
        }
        if self.scroll + height > self.rows.len() {
            self.scroll = self.rows.len().saturating_sub(height);
        }
    }
}
