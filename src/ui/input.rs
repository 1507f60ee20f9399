use crate::browse::{BrowseEvent, PageControl};
use crate::ui::app::{App, Focus};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    match app.focus() {
        Focus::SearchInput | Focus::GotoInput => handle_line_input(app, key),
        Focus::Panel => handle_panel_key(app, key),
        Focus::Listing => handle_listing_key(app, key),
    }
}

fn handle_line_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => app.submit_input(),
        KeyCode::Backspace => app.pop_input(),
        KeyCode::Char(ch) => app.push_input(ch),
        _ => {}
    }
}

fn handle_panel_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_panel(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_panel(-1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_panel(1),
        _ => {}
    }
}

fn handle_listing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        KeyCode::Char('/') => app.begin_search(),
        KeyCode::Char('g') => app.begin_goto(),
        KeyCode::Char('c') => app.dispatch(BrowseEvent::Clear),
        KeyCode::Char('r') => app.dispatch(BrowseEvent::Retry),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::Enter => {
            if let Some(id) = app.listing().selected_item().map(|item| item.id) {
                app.dispatch(BrowseEvent::OpenItem(id));
            }
        }
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') => {
            navigate_by(app, |control| matches!(control, PageControl::Prev(_)))
        }
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') => {
            navigate_by(app, |control| matches!(control, PageControl::Next(_)))
        }
        KeyCode::Home => navigate_by(app, |control| matches!(control, PageControl::First)),
        KeyCode::End => navigate_by(app, |control| matches!(control, PageControl::Last(_))),
        _ => {}
    }
}

/// Navigate through a visible pager control, so keys can only reach pages
/// the pager would offer.
fn navigate_by(app: &mut App, pick: impl Fn(&PageControl) -> bool) {
    let target = app
        .page_window()
        .controls()
        .iter()
        .find(|control| pick(control))
        .map(PageControl::target);
    if let Some(page) = target {
        app.dispatch(BrowseEvent::Navigate(page));
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
