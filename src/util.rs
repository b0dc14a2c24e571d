use std::fs;
use std::path::Path;

use ratatui::layout::Rect;

pub(crate) fn inside(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Dotfile convention on Unix-likes; the hidden attribute on Windows.
#[cfg(not(windows))]
pub(crate) fn is_hidden(path: &Path, _md: &fs::Metadata) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

#[cfg(windows)]
pub(crate) fn is_hidden(_path: &Path, md: &fs::Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    md.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside_respects_all_four_edges() {
        let rect = Rect::new(2, 3, 4, 2);
        assert!(inside(2, 3, rect));
        assert!(inside(5, 4, rect));
        assert!(!inside(6, 4, rect));
        assert!(!inside(5, 5, rect));
        assert!(!inside(1, 3, rect));
    }

    #[cfg(not(windows))]
    #[test]
    fn dotfiles_are_hidden() {
        let dir = tempfile::tempdir().unwrap();
        let visible = dir.path().join("notes.txt");
        let hidden = dir.path().join(".notes");
        std::fs::write(&visible, b"").unwrap();
        std::fs::write(&hidden, b"").unwrap();
        assert!(!is_hidden(&visible, &std::fs::metadata(&visible).unwrap()));
        assert!(is_hidden(&hidden, &std::fs::metadata(&hidden).unwrap()));
    }
}
