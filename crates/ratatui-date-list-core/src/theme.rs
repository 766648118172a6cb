use ratatui::style::Style;

/// Colors shared by the widgets in this workspace.
///
/// `selected_fg`/`selected_bg` are the highlight for a chosen row: the accent color as the
/// background with the regular background color as the text, so it reads as inverted.
#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub selected_fg: Style,
    pub selected_bg: Style,
    pub background: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            selected_fg: Style::default().black(),
            selected_bg: Style::default().on_cyan(),
            background: Style::default(),
        }
    }
}

impl Theme {
    /// The style a selected row is painted with.
    pub fn selected(&self) -> Style {
        self.background
            .patch(self.selected_bg)
            .patch(self.selected_fg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn selected_style_inverts_accent() {
        let theme = Theme::default();
        let s = theme.selected();
        assert_eq!(s.bg, Some(Color::Cyan));
        assert_eq!(s.fg, Some(Color::Black));
    }
}
