use crate::browse::{
    BrowseEvent, FetchTarget, FetchTicket, ItemPanel, PageWindow, RenderController, Resolution,
    SearchState,
};
use crate::catalog::{ResultItem, ResultPage, TransportError};
use crate::ui::listing::{ListingIntent, ListingReducer, ListingState};
use crate::ui::mvi::Reducer;
use crate::ui::panel::{PanelIntent, PanelReducer, PanelState};
use tokio::sync::mpsc;
use tracing::warn;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Focus {
    Listing,
    SearchInput,
    GotoInput,
    Panel,
}

/// Work the UI hands to the runtime's task worker.
#[derive(Debug)]
pub enum UiCommand {
    Fetch { ticket: FetchTicket },
    Lookup { item: ResultItem },
}

pub type UiCommandSender = mpsc::Sender<UiCommand>;

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub struct App {
    should_quit: bool,
    focus: Focus,
    controller: RenderController,
    image_base_url: String,
    listing_label: &'static str,
    /// Listing view state (MVI pattern).
    listing: ListingState,
    /// Item panel state (MVI pattern).
    panel: PanelState,
    search_input: String,
    goto_input: String,
    command_sender: Option<UiCommandSender>,
    last_command_error: Option<String>,
}

impl App {
    pub fn new(controller: RenderController, image_base_url: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            focus: Focus::Listing,
            controller,
            image_base_url: image_base_url.into(),
            listing_label: "Browse",
            listing: ListingState::default(),
            panel: PanelState::default(),
            search_input: String::new(),
            goto_input: String::new(),
            command_sender: None,
            last_command_error: None,
        }
    }

    pub fn set_command_sender(&mut self, sender: UiCommandSender) {
        self.command_sender = Some(sender);
    }

    /// Header label for the query-less listing.
    pub fn set_listing_label(&mut self, label: &'static str) {
        self.listing_label = label;
    }

    pub fn listing_label(&self) -> &'static str {
        self.listing_label
    }

    /// Name of the fetcher backing this session.
    pub fn source_name(&self) -> &'static str {
        self.controller.fetcher_name()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn search_state(&self) -> &SearchState {
        self.controller.state()
    }

    pub fn page_window(&self) -> PageWindow {
        PageWindow::for_state(self.controller.state())
    }

    pub fn listing(&self) -> &ListingState {
        &self.listing
    }

    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn goto_input(&self) -> &str {
        &self.goto_input
    }

    pub fn last_command_error(&self) -> Option<&str> {
        self.last_command_error.as_deref()
    }

    /// Issue the first fetch of the session.
    pub fn start(&mut self, target: FetchTarget) {
        let ticket = self.controller.issue_target(target);
        self.begin_fetch(ticket);
    }

    /// Route one user action to the controller or the panel.
    pub fn dispatch(&mut self, event: BrowseEvent) {
        if let BrowseEvent::OpenItem(id) = event {
            self.open_item(id);
            return;
        }
        if let Some(ticket) = self.controller.issue(&event) {
            self.begin_fetch(ticket);
        }
    }

    /// A fetch task finished. Superseded results are dropped.
    pub fn on_page_loaded(
        &mut self,
        ticket: FetchTicket,
        result: Result<ResultPage, TransportError>,
    ) {
        match self.controller.resolve(ticket, result) {
            Resolution::Applied(render) => self.dispatch_listing(ListingIntent::Rendered(render)),
            Resolution::Reissued(next) => self.begin_fetch(next),
            Resolution::Superseded => {}
        }
    }

    pub fn on_item_loaded(&mut self, panel: ItemPanel) {
        self.dispatch_panel(PanelIntent::Loaded {
            panel: Box::new(panel),
        });
    }

    // ========================================================================
    // Focus and input buffers
    // ========================================================================

    pub fn begin_search(&mut self) {
        self.search_input = self.controller.state().query().to_string();
        self.focus = Focus::SearchInput;
    }

    pub fn begin_goto(&mut self) {
        self.goto_input.clear();
        self.focus = Focus::GotoInput;
    }

    pub fn cancel_input(&mut self) {
        self.focus = Focus::Listing;
    }

    pub fn push_input(&mut self, ch: char) {
        match self.focus {
            Focus::SearchInput => self.search_input.push(ch),
            Focus::GotoInput if ch.is_ascii_digit() => self.goto_input.push(ch),
            _ => {}
        }
    }

    pub fn pop_input(&mut self) {
        match self.focus {
            Focus::SearchInput => {
                self.search_input.pop();
            }
            Focus::GotoInput => {
                self.goto_input.pop();
            }
            _ => {}
        }
    }

    /// Submit whichever input line has focus.
    pub fn submit_input(&mut self) {
        let focus = self.focus;
        self.focus = Focus::Listing;
        match focus {
            Focus::SearchInput => {
                let text = std::mem::take(&mut self.search_input);
                if text.trim().is_empty() {
                    self.dispatch(BrowseEvent::Clear);
                } else {
                    self.dispatch(BrowseEvent::Search(text));
                }
            }
            Focus::GotoInput => {
                let page = std::mem::take(&mut self.goto_input).parse::<u32>().ok();
                if let Some(page) = page.filter(|page| *page >= 1) {
                    self.dispatch(BrowseEvent::Navigate(page));
                }
            }
            _ => {}
        }
    }

    // ========================================================================
    // Listing methods (MVI pattern)
    // ========================================================================

    pub fn move_selection(&mut self, direction: i32) {
        if direction.is_negative() {
            self.dispatch_listing(ListingIntent::MoveUp);
        } else {
            self.dispatch_listing(ListingIntent::MoveDown);
        }
    }

    fn dispatch_listing(&mut self, intent: ListingIntent) {
        dispatch_mvi!(self, listing, ListingReducer, intent);
    }

    /// Show `Loading` and hand the ticket to the worker.
    ///
    /// The ticket is already the latest one, so any fetch still running is
    /// superseded. If the worker never receives it, the listing fails right
    /// away instead of waiting on a result that cannot arrive.
    fn begin_fetch(&mut self, ticket: FetchTicket) {
        self.dispatch_listing(ListingIntent::Loading);
        if let Err(details) = self.send_command(UiCommand::Fetch { ticket }) {
            self.dispatch_listing(ListingIntent::NotScheduled { details });
        }
    }

    // ========================================================================
    // Panel methods (MVI pattern)
    // ========================================================================

    pub fn close_panel(&mut self) {
        self.dispatch_panel(PanelIntent::Close);
        self.focus = Focus::Listing;
    }

    pub fn scroll_panel(&mut self, direction: i32) {
        if direction.is_negative() {
            self.dispatch_panel(PanelIntent::ScrollUp);
        } else {
            self.dispatch_panel(PanelIntent::ScrollDown);
        }
    }

    fn dispatch_panel(&mut self, intent: PanelIntent) {
        dispatch_mvi!(self, panel, PanelReducer, intent);
    }

    fn open_item(&mut self, id: u64) {
        let item = match &self.listing {
            ListingState::Items { items, .. } => items.iter().find(|item| item.id == id).cloned(),
            _ => None,
        };
        let Some(item) = item else {
            warn!(id, "Open requested for an item that is not listed");
            return;
        };
        self.dispatch_panel(PanelIntent::Open { item: item.clone() });
        self.focus = Focus::Panel;
        if self.send_command(UiCommand::Lookup { item: item.clone() }).is_err() {
            let mut panel = ItemPanel::links_only(item);
            panel
                .notes
                .push("Lookups could not be started; showing links only.".to_string());
            self.on_item_loaded(panel);
        }
    }

    /// Queue `command` for the worker. The error text is also kept in
    /// `last_command_error`.
    fn send_command(&mut self, command: UiCommand) -> Result<(), String> {
        let result = match &self.command_sender {
            Some(sender) => sender
                .try_send(command)
                .map_err(|err| format!("Command send failed: {}", err)),
            None => Err("Command worker is not running".to_string()),
        };

        match &result {
            Ok(()) => self.last_command_error = None,
            Err(message) => {
                warn!(error = %message, "UI command dropped");
                self.last_command_error = Some(message.clone());
            }
        }
        result
    }
}
