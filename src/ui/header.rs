use crate::browse::SearchState;
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header<'a> {
    state: &'a SearchState,
    listing_label: &'a str,
    source: &'static str,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a SearchState, listing_label: &'a str, source: &'static str) -> Self {
        Self {
            state,
            listing_label,
            source,
        }
    }

    pub fn widget(&self) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let mode = if self.state.is_listing() {
            self.listing_label.to_string()
        } else {
            format!("Search: {}", self.state.query())
        };
        let line = Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled(
                "moviedeck",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(mode, text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(
                format!(
                    "Page {} of {}",
                    self.state.page(),
                    self.state.total_pages()
                ),
                text_style,
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(self.source, text_style),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
