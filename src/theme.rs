use ratatui::style::Color;

/// Fixed palette mirroring the tree view's look: yellow directories, plain
/// files, a light blue check dot.
#[derive(Debug, Clone)]
pub(crate) struct Theme {
    pub(crate) fg: Color,
    pub(crate) bg_alt: Color,
    pub(crate) muted: Color,
    pub(crate) accent: Color,
    pub(crate) dir: Color,
    pub(crate) ok: Color,
    pub(crate) warn: Color,
    pub(crate) error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            bg_alt: Color::DarkGray,
            muted: Color::DarkGray,
            accent: Color::LightBlue,
            dir: Color::Yellow,
            ok: Color::Green,
            warn: Color::Yellow,
            error: Color::Red,
        }
    }
}
