use ratatui::{
    prelude::{Alignment, Buffer, Line, Rect, Span, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use derive_setters::Setters;

/// Key bindings listed in the help popup, blank entries become spacer lines
pub const KEY_BINDINGS: [(&str, &str); 17] = [
    ("q", "Quit the application."),
    ("<Esc>", "Back"),
    ("s", "Save the current frame."),
    ("", ""),
    ("h", "Move cube left."),
    ("l", "Move cube right."),
    ("k", "Move cube up."),
    ("j", "Move cube down."),
    ("u", "Move cube away."),
    ("d", "Move cube closer."),
    ("", ""),
    ("H", "Move light left."),
    ("L", "Move light right."),
    ("K", "Move light up."),
    ("J", "Move light down."),
    ("", ""),
    ("?", "Show this help."),
];

/// Help window listing key bindings, one per line with the keys padded to a common width
#[derive(Debug, Setters)]
pub struct HelpPopup<'a> {
    #[setters(into)]
    title: Line<'a>,
    bindings: &'a [(&'a str, &'a str)],
    key_width: usize,
    key_style: Style,
    border_style: Style,
    title_style: Style,
    style: Style,
}

impl Default for HelpPopup<'_> {
    fn default() -> Self {
        Self {
            title: Line::from("Help"),
            bindings: &KEY_BINDINGS,
            key_width: 8,
            key_style: Style::default(),
            border_style: Style::default(),
            title_style: Style::default(),
            style: Style::default(),
        }
    }
}

impl<'a> HelpPopup<'a> {
    /// A blank key gives an empty spacer line
    pub fn lines(&self) -> Vec<Line<'a>> {
        self.bindings
            .iter()
            .map(|&(key, description)| {
                if key.is_empty() {
                    return Line::default();
                }
                let key = format!("{:<width$}", format!("{key}:"), width = self.key_width);
                Line::from(vec![
                    Span::styled(key, self.key_style),
                    Span::raw(description),
                ])
            })
            .collect()
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let lines = self.lines();
        let block = Block::new()
            .borders(Borders::ALL)
            .border_style(self.border_style)
            .title(self.title)
            .title_style(self.title_style)
            .title_alignment(Alignment::Center);
        Paragraph::new(lines)
            .style(self.style)
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines() {
        let text = |line: &Line| -> String { line.spans.iter().map(|s| s.content.as_ref()).collect() };

        let lines = HelpPopup::default().lines();
        assert_eq!(lines.len(), KEY_BINDINGS.len());
        assert_eq!(text(&lines[0]), "q:      Quit the application.");
        assert_eq!(text(&lines[3]), "");

        let bindings = [("<Esc>", "Back"), ("", ""), ("?", "Help")];
        let lines = HelpPopup::default().bindings(&bindings).key_width(3).lines();
        // Keys longer than the width are not cut
        assert_eq!(text(&lines[0]), "<Esc>:Back");
        assert!(lines[1].spans.is_empty());
        assert_eq!(text(&lines[2]), "?: Help");
    }

    #[test]
    fn test_popup_draws_title_and_content() {
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        HelpPopup::default()
            .title("Keys")
            .render(area, &mut buf);
        let top: String = (0..area.width)
            .map(|x| buf.get(x, 0).symbol().to_string())
            .collect();
        assert!(top.contains("Keys"));
        let second: String = (0..area.width)
            .map(|x| buf.get(x, 1).symbol().to_string())
            .collect();
        assert!(second.contains("q:"));
    }
}
