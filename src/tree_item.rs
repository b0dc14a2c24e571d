use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use unicode_width::UnicodeWidthStr;

use crate::util::is_hidden;

/// One filesystem entry in the scanned tree. Owned by its parent; the root
/// is owned by the application.
#[derive(Debug, Clone)]
pub(crate) struct TreeItem {
    pub(crate) path: PathBuf,
    pub(crate) name: String,
    pub(crate) is_dir: bool,
    pub(crate) children: Vec<TreeItem>,
    pub(crate) checked: bool,
    pub(crate) expanded: bool,
}

impl TreeItem {
    fn new(path: PathBuf, is_dir: bool) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path,
            name,
            is_dir,
            children: Vec::new(),
            // Everything starts selected, matching a fresh scan.
            checked: true,
            expanded: false,
        }
    }

    /// Display name, with a trailing path separator for directories.
    pub(crate) fn display_name(&self) -> String {
        if self.is_dir {
            format!("{}{MAIN_SEPARATOR}", self.name)
        } else {
            self.name.clone()
        }
    }

    fn set_checked_deep(&mut self, value: bool) {
        self.checked = value;
        for child in &mut self.children {
            child.set_checked_deep(value);
        }
    }
}

/// Scans `root` into a tree: directories before files, each group sorted by
/// ASCII-lowercased name, hidden entries filtered unless `show_hidden`.
/// Returns the root item plus the number of entries skipped as unreadable.
/// The root itself is expanded; everything below starts collapsed.
pub(crate) fn build_tree(root: &Path, show_hidden: bool) -> (TreeItem, usize) {
    let mut skipped = 0;
    let mut item = TreeItem::new(root.to_path_buf(), root.is_dir());
    scan_into(&mut item, show_hidden, &mut skipped);
    item.expanded = true;
    (item, skipped)
}

fn scan_into(item: &mut TreeItem, show_hidden: bool, skipped: &mut usize) {
    if !item.is_dir {
        return;
    }
    let entries = match fs::read_dir(&item.path) {
        Ok(entries) => entries,
        Err(_) => {
            // Unreadable directory: keep the node, drop its contents.
            *skipped += 1;
            return;
        }
    };

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in entries {
        let Ok(entry) = entry else {
            *skipped += 1;
            continue;
        };
        let path = entry.path();
        let Ok(md) = fs::symlink_metadata(&path) else {
            *skipped += 1;
            continue;
        };
        // Avoid following directory symlink cycles.
        if md.file_type().is_symlink() {
            continue;
        }
        if !show_hidden && is_hidden(&path, &md) {
            continue;
        }
        if md.is_dir() {
            dirs.push(path);
        } else {
            files.push(path);
        }
    }

    let by_name = |p: &PathBuf| {
        p.file_name()
            .map(|s| s.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default()
    };
    dirs.sort_by_key(by_name);
    files.sort_by_key(by_name);

    for path in dirs {
        let mut child = TreeItem::new(path, true);
        scan_into(&mut child, show_hidden, skipped);
        item.children.push(child);
    }
    for path in files {
        item.children.push(TreeItem::new(path, false));
    }
}

fn node_at_mut<'a>(root: &'a mut TreeItem, idx_path: &[usize]) -> &'a mut TreeItem {
    let mut node = root;
    for &i in idx_path {
        node = &mut node.children[i];
    }
    node
}

/// Flips the check mark on the node addressed by `idx_path` (root is the
/// empty path). Directories carry the new value down to every descendant;
/// afterwards each ancestor on the way back up is checked iff at least one
/// of its children is checked.
pub(crate) fn toggle_check(root: &mut TreeItem, idx_path: &[usize]) {
    fn inner(node: &mut TreeItem, rest: &[usize]) {
        match rest.split_first() {
            None => {
                let value = !node.checked;
                node.set_checked_deep(value);
            }
            Some((&i, tail)) => {
                inner(&mut node.children[i], tail);
                node.checked = node.children.iter().any(|c| c.checked);
            }
        }
    }
    inner(root, idx_path);
}

/// Flips collapse/expand on a directory node; a no-op for files and never
/// touches check state.
pub(crate) fn toggle_expand(root: &mut TreeItem, idx_path: &[usize]) {
    let node = node_at_mut(root, idx_path);
    if node.is_dir {
        node.expanded = !node.expanded;
    }
}

/// One rendered line of the tree view.
#[derive(Debug, Clone)]
pub(crate) struct Row {
    pub(crate) idx_path: Vec<usize>,
    pub(crate) path: PathBuf,
    pub(crate) prefix: String,
    pub(crate) connector: &'static str,
    pub(crate) name: String,
    pub(crate) is_dir: bool,
    pub(crate) checked: bool,
    pub(crate) expanded: bool,
    /// Column where the `[•]` bracket starts, for mouse hit-testing.
    pub(crate) check_start: usize,
}

/// Flattens the tree into display rows. A node is visible iff all its
/// ancestors are expanded; the root is always visible and shows the full
/// path instead of the bare name.
pub(crate) fn visible_rows(root: &TreeItem) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut root_name = root.path.display().to_string();
    if root.is_dir {
        root_name.push(MAIN_SEPARATOR);
    }
    rows.push(Row {
        idx_path: Vec::new(),
        path: root.path.clone(),
        prefix: String::new(),
        connector: "",
        name: root_name,
        is_dir: root.is_dir,
        checked: root.checked,
        expanded: root.expanded,
        check_start: 0,
    });
    if root.is_dir && root.expanded {
        push_rows(root, &mut rows, &mut Vec::new(), "");
    }
    rows
}

fn push_rows(item: &TreeItem, rows: &mut Vec<Row>, idx_path: &mut Vec<usize>, prefix: &str) {
    let count = item.children.len();
    for (i, child) in item.children.iter().enumerate() {
        let last = i + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        idx_path.push(i);
        rows.push(Row {
            idx_path: idx_path.clone(),
            path: child.path.clone(),
            prefix: prefix.to_string(),
            connector,
            name: child.display_name(),
            is_dir: child.is_dir,
            checked: child.checked,
            expanded: child.expanded,
            check_start: prefix.width() + connector.width(),
        });
        if child.is_dir && child.expanded {
            let deeper = format!("{prefix}{}", if last { "    " } else { "│   " });
            push_rows(child, rows, idx_path, &deeper);
        }
        idx_path.pop();
    }
}

/// Renders the checked subset as a copy-ready text block, same connector
/// scheme as the view but without the checkbox brackets. The first line is
/// the root path. Returns `None` when nothing is checked.
pub(crate) fn selection_text(root: &TreeItem) -> Option<String> {
    if !root.checked {
        return None;
    }
    let mut lines = Vec::new();
    let mut root_line = root.path.display().to_string();
    if root.is_dir {
        root_line.push(MAIN_SEPARATOR);
    }
    lines.push(root_line);
    push_checked(root, &mut lines, "");
    Some(lines.join("\n"))
}

fn push_checked(item: &TreeItem, lines: &mut Vec<String>, prefix: &str) {
    let checked: Vec<&TreeItem> = item.children.iter().filter(|c| c.checked).collect();
    let count = checked.len();
    for (i, child) in checked.into_iter().enumerate() {
        let last = i + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        lines.push(format!("{prefix}{connector}{}", child.display_name()));
        if child.is_dir {
            let deeper = format!("{prefix}{}", if last { "    " } else { "│   " });
            push_checked(child, lines, &deeper);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("B")).unwrap();
        fs::write(dir.path().join("B").join("c.txt"), b"").unwrap();
        fs::write(dir.path().join("a.txt"), b"").unwrap();
        dir
    }

    fn child_names(item: &TreeItem) -> Vec<&str> {
        item.children.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn directories_come_first_sorted_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("Zeta")).unwrap();
        fs::create_dir(dir.path().join("alpha")).unwrap();
        fs::write(dir.path().join("b.txt"), b"").unwrap();
        fs::write(dir.path().join("A.txt"), b"").unwrap();

        let (root, skipped) = build_tree(dir.path(), false);
        assert_eq!(skipped, 0);
        assert_eq!(child_names(&root), ["alpha", "Zeta", "A.txt", "b.txt"]);
    }

    #[test]
    fn hidden_entries_follow_the_flag() {
        let dir = fixture();
        fs::write(dir.path().join(".hidden"), b"").unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let (root, _) = build_tree(dir.path(), false);
        assert_eq!(child_names(&root), ["B", "a.txt"]);

        let (root, _) = build_tree(dir.path(), true);
        assert_eq!(child_names(&root), [".git", "B", ".hidden", "a.txt"]);
    }

    #[test]
    fn fresh_scan_is_fully_checked_and_collapsed_below_root() {
        let dir = fixture();
        let (root, _) = build_tree(dir.path(), false);
        assert!(root.expanded);
        assert!(root.checked);
        assert!(root.children.iter().all(|c| c.checked));
        assert!(!root.children[0].expanded);
    }

    #[test]
    fn toggling_a_leaf_leaves_siblings_alone() {
        let dir = fixture();
        let (mut root, _) = build_tree(dir.path(), false);
        // a.txt is the second child, after the B directory.
        toggle_check(&mut root, &[1]);
        assert!(!root.children[1].checked);
        assert!(root.children[0].checked);
        assert!(root.children[0].children[0].checked);
    }

    #[test]
    fn toggling_a_directory_sets_the_whole_subtree() {
        let dir = fixture();
        let (mut root, _) = build_tree(dir.path(), false);
        toggle_check(&mut root, &[0]);
        assert!(!root.children[0].checked);
        assert!(!root.children[0].children[0].checked);
        // a.txt is still checked, so the root stays checked.
        assert!(root.checked);
        toggle_check(&mut root, &[0]);
        assert!(root.children[0].children[0].checked);
    }

    #[test]
    fn ancestor_is_checked_iff_some_descendant_is() {
        let dir = fixture();
        let (mut root, _) = build_tree(dir.path(), false);
        toggle_check(&mut root, &[1]); // uncheck a.txt
        assert!(root.checked); // c.txt still holds the root
        toggle_check(&mut root, &[0, 0]); // uncheck c.txt
        assert!(!root.children[0].checked);
        assert!(!root.checked);
        toggle_check(&mut root, &[0, 0]); // re-check c.txt
        assert!(root.children[0].checked);
        assert!(root.checked);
    }

    #[test]
    fn collapse_hides_descendants_and_expand_restores_them() {
        let dir = fixture();
        let (mut root, _) = build_tree(dir.path(), false);
        let collapsed: Vec<_> = visible_rows(&root).into_iter().map(|r| r.path).collect();
        assert_eq!(collapsed.len(), 3); // root, B, a.txt

        toggle_expand(&mut root, &[0]);
        let expanded: Vec<_> = visible_rows(&root).into_iter().map(|r| r.path).collect();
        assert_eq!(expanded.len(), 4);
        assert_eq!(expanded[2], root.children[0].children[0].path);

        toggle_expand(&mut root, &[0]);
        let restored: Vec<_> = visible_rows(&root).into_iter().map(|r| r.path).collect();
        assert_eq!(restored, collapsed);
    }

    #[test]
    fn toggle_expand_never_touches_check_state() {
        let dir = fixture();
        let (mut root, _) = build_tree(dir.path(), false);
        toggle_check(&mut root, &[0, 0]);
        let before: Vec<bool> = root.children.iter().map(|c| c.checked).collect();
        toggle_expand(&mut root, &[0]);
        let after: Vec<bool> = root.children.iter().map(|c| c.checked).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn rows_carry_connectors_and_bracket_columns() {
        let dir = fixture();
        let (mut root, _) = build_tree(dir.path(), false);
        toggle_expand(&mut root, &[0]);
        let rows = visible_rows(&root);

        assert_eq!(rows[0].check_start, 0);
        assert_eq!(rows[1].connector, "├── "); // B/ with a.txt after it
        assert_eq!(rows[1].check_start, 4);
        assert_eq!(rows[2].prefix, "│   "); // c.txt under the open B/
        assert_eq!(rows[2].connector, "└── ");
        assert_eq!(rows[2].check_start, 8);
        assert_eq!(rows[3].connector, "└── ");
    }

    #[test]
    fn export_matches_view_connectors_for_a_full_selection() {
        let dir = fixture();
        let (root, _) = build_tree(dir.path(), false);
        let text = selection_text(&root).unwrap();
        let sep = MAIN_SEPARATOR;
        let expected = format!(
            "{root}{sep}\n├── B{sep}\n│   └── c.txt\n└── a.txt",
            root = dir.path().display()
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn checking_a_file_pulls_its_parent_into_the_export() {
        let dir = fixture();
        let (mut root, _) = build_tree(dir.path(), false);
        toggle_check(&mut root, &[]); // clear everything
        assert!(selection_text(&root).is_none());

        toggle_check(&mut root, &[0, 0]); // check c.txt only
        let text = selection_text(&root).unwrap();
        assert!(text.contains(&format!("B{MAIN_SEPARATOR}")));
        assert!(text.contains("c.txt"));
        assert!(!text.contains("a.txt"));
    }

    #[test]
    fn export_strips_checkbox_glyphs() {
        let dir = fixture();
        let (root, _) = build_tree(dir.path(), false);
        let text = selection_text(&root).unwrap();
        assert!(!text.contains('['));
        assert!(!text.contains('•'));
    }
}
