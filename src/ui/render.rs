use crate::browse::{ItemPanel, PageControl};
use crate::catalog::ResultItem;
use crate::ui::app::{App, Focus};
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{centered_rect, layout_regions, split_body};
use crate::ui::listing::ListingState;
use crate::ui::panel::PanelState;
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, POPUP_BORDER,
    STATUS_ERROR, STATUS_OK,
};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, pager, footer) = layout_regions(area);

    let header_widget = Header::new(app.search_state(), app.listing_label(), app.source_name());
    frame.render_widget(header_widget.widget(), header);
    frame.render_widget(Clear, body);
    draw_body(frame, app, body);
    frame.render_widget(pager_widget(app), pager);
    let footer_widget = Footer::new(app.focus());
    frame.render_widget(footer_widget.widget(footer), footer);

    match app.focus() {
        Focus::SearchInput => draw_input(frame, body, "Search titles", app.search_input()),
        Focus::GotoInput => draw_input(frame, body, "Go to page", app.goto_input()),
        Focus::Listing | Focus::Panel => {}
    }

    match app.panel() {
        PanelState::Hidden => {}
        PanelState::Loading { panel } => draw_panel(frame, body, panel, 0, true),
        PanelState::Ready { panel, scroll } => draw_panel(frame, body, panel, *scroll, false),
    }
}

fn draw_body(frame: &mut Frame<'_>, app: &App, body: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));

    match app.listing() {
        ListingState::Loading => {
            frame.render_widget(centered_message("Loading…", HEADER_TEXT).block(block), body);
        }
        ListingState::Empty => {
            frame.render_widget(
                centered_message("No results found.", HEADER_TEXT).block(block),
                body,
            );
        }
        ListingState::Failed { message, details } => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    message.clone(),
                    Style::default()
                        .fg(STATUS_ERROR)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    details.clone(),
                    Style::default().fg(HEADER_SEPARATOR),
                )),
                Line::from(""),
                Line::from("Press r to retry."),
            ];
            let widget = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(widget, body);
        }
        ListingState::Items { items, selected } => {
            let (list_area, details_area) = split_body(body);
            let rows: Vec<ListItem> = items
                .iter()
                .map(|item| {
                    ListItem::new(Line::from(vec![
                        Span::styled(item.title.clone(), Style::default().fg(HEADER_TEXT)),
                        Span::styled(
                            format!("  ({})", item.year_label()),
                            Style::default().fg(HEADER_SEPARATOR),
                        ),
                    ]))
                })
                .collect();
            let list = List::new(rows)
                .block(block.clone().title(" Results "))
                .highlight_style(Style::default().bg(ACTIVE_HIGHLIGHT).fg(ACCENT))
                .highlight_symbol("▶ ");
            let mut list_state = ListState::default().with_selected(Some(*selected));
            frame.render_stateful_widget(list, list_area, &mut list_state);

            if let Some(item) = items.get(*selected) {
                let widget = Paragraph::new(item_lines(item, app.image_base_url()))
                    .wrap(Wrap { trim: true })
                    .block(block.title(" Details "));
                frame.render_widget(widget, details_area);
            }
        }
    }
}

fn centered_message(text: &str, color: Color) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(text.to_string(), Style::default().fg(color))),
    ])
    .alignment(Alignment::Center)
}

fn item_lines(item: &ResultItem, image_base_url: &str) -> Vec<Line<'static>> {
    let label = Style::default().fg(HEADER_SEPARATOR);
    let mut lines = vec![
        Line::from(Span::styled(
            item.title.clone(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Year: ", label),
            Span::raw(item.year_label()),
            Span::styled("   Rating: ", label),
            Span::raw(item.rating_label()),
        ]),
    ];
    if let Some(poster) = &item.poster {
        lines.push(Line::from(vec![
            Span::styled("Poster: ", label),
            Span::raw(poster.url(image_base_url)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(item.overview_text().to_string()));
    lines
}

fn pager_widget(app: &App) -> Paragraph<'static> {
    let mut spans = vec![Span::raw(" ")];
    for control in app.page_window().controls() {
        let style = match control {
            PageControl::Page { current: true, .. } => Style::default()
                .fg(ACCENT)
                .bg(ACTIVE_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
            PageControl::Page { .. } => Style::default().fg(HEADER_TEXT),
            _ => Style::default().fg(HEADER_SEPARATOR),
        };
        spans.push(Span::styled(format!(" {} ", control.label()), style));
    }
    if let Some(error) = app.last_command_error() {
        spans.push(Span::styled(
            format!("  {}", error),
            Style::default().fg(STATUS_ERROR),
        ));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

fn draw_input(frame: &mut Frame<'_>, body: Rect, title: &str, value: &str) {
    let width = body.width.min(60);
    let area = Rect {
        x: body.x + (body.width.saturating_sub(width)) / 2,
        y: body.y + body.height.saturating_sub(3) / 2,
        width,
        height: 3.min(body.height),
    };
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(ACCENT),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    frame.render_widget(Paragraph::new(value.to_string()).block(block), area);

    if area.width > 2 && area.height > 2 {
        let cursor_x = area.x + 1 + (value.chars().count() as u16).min(area.width - 3);
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn draw_panel(frame: &mut Frame<'_>, body: Rect, panel: &ItemPanel, scroll: u16, loading: bool) {
    let area = centered_rect(80, 80, body);
    let label = Style::default().fg(HEADER_SEPARATOR);
    let link = Style::default().fg(STATUS_OK);
    let mut lines = vec![Line::from(vec![
        Span::styled("Year: ", label),
        Span::raw(panel.item.year_label()),
        Span::styled("   Rating: ", label),
        Span::raw(panel.item.rating_label()),
    ])];

    if let Some(details) = &panel.details {
        lines.push(Line::from(vec![
            Span::styled("Runtime: ", label),
            Span::raw(details.runtime_label()),
        ]));
        if !details.genres.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Genres: ", label),
                Span::raw(details.genres.join(", ")),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(panel.item.overview_text().to_string()));
    lines.push(Line::from(""));

    if loading {
        lines.push(Line::from(Span::styled(
            "Looking up trailer and archive…",
            label,
        )));
    } else {
        match &panel.trailer {
            Some(trailer) => {
                lines.push(Line::from(vec![
                    Span::styled("Trailer: ", label),
                    Span::raw(format!("{} ", trailer.name)),
                    Span::styled(trailer.watch_url(), link),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("Embed: ", label),
                    Span::styled(trailer.embed_url(), link),
                ]));
            }
            None => lines.push(Line::from(Span::styled("No trailer found.", label))),
        }

        if panel.archive.is_empty() {
            lines.push(Line::from(Span::styled(
                "No public-domain copy found.",
                label,
            )));
        } else {
            lines.push(Line::from(Span::styled("Internet Archive:", label)));
            for archived in &panel.archive {
                lines.push(Line::from(vec![
                    Span::raw(format!("  {} ", archived.item.title)),
                    Span::styled(archived.embed_url.clone(), link),
                ]));
            }
        }

        for note in &panel.notes {
            lines.push(Line::from(Span::styled(
                note.clone(),
                Style::default().fg(STATUS_ERROR),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Where to watch:", label)));
    for platform in &panel.links {
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<16}", platform.platform)),
            Span::styled(platform.url.clone(), link),
        ]));
    }

    frame.render_widget(Clear, area);
    let popup = Block::default()
        .title(Span::styled(
            format!(" {} ", panel.item.title),
            Style::default().fg(ACCENT),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(popup);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::{BrowseEvent, RenderController};
    use crate::catalog::{Fetcher, PosterRef, ResultPage, TransportError};
    use crate::ui::app::UiCommand;
    use async_trait::async_trait;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    struct NoopFetcher;

    #[async_trait]
    impl Fetcher for NoopFetcher {
        fn name(&self) -> &'static str {
            "noop"
        }

        async fn fetch(&self, _page: u32, _query: &str) -> Result<ResultPage, TransportError> {
            Ok(ResultPage::new(Vec::new(), 1))
        }
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn loaded_app(result: Result<ResultPage, TransportError>) -> App {
        let mut app = App::new(RenderController::new(Arc::new(NoopFetcher)), "https://img");
        let (tx, mut rx) = mpsc::channel(4);
        app.set_command_sender(tx);
        app.dispatch(BrowseEvent::Navigate(2));
        let Ok(UiCommand::Fetch { ticket }) = rx.try_recv() else {
            panic!("expected fetch");
        };
        app.on_page_loaded(ticket, result);
        app
    }

    #[test]
    fn failed_fetch_shows_retry_hint() {
        let app = loaded_app(Err(TransportError::Status {
            endpoint: "/movie/popular".to_string(),
            status: 401,
        }));
        let text = screen_text(&app);
        assert!(text.contains("The API key was rejected"));
        assert!(text.contains("Press r to retry."));
    }

    #[test]
    fn empty_page_shows_no_results() {
        let app = loaded_app(Ok(ResultPage::new(Vec::new(), 1)));
        assert!(screen_text(&app).contains("No results found."));
    }

    #[test]
    fn items_render_with_pager() {
        let item = ResultItem {
            id: 1,
            title: "Heat".to_string(),
            release_year: Some(1995),
            rating: Some(8.3),
            overview: None,
            poster: Some(PosterRef::new("/heat.jpg")),
        };
        let app = loaded_app(Ok(ResultPage::new(vec![item], 6)));
        let text = screen_text(&app);
        assert!(text.contains("Heat"));
        assert!(text.contains("(1995)"));
        assert!(text.contains("Page 2 of 6"));
        assert!(text.contains("‹ Prev"));
        assert!(text.contains("Last »"));
    }
}
