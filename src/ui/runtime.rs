use crate::browse::{open_item, FetchTarget, RenderController};
use crate::catalog::{ArchiveClient, Fetcher, Providers};
use crate::shutdown::ShutdownHandle;
use crate::ui::app::{App, UiCommand};
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use std::io;
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Bound on queued UI commands; `try_send` drops beyond this.
const COMMAND_BUFFER: usize = 64;

/// Session settings resolved from the config and command line.
pub struct SessionOptions {
    pub initial: FetchTarget,
    pub image_base_url: String,
    pub listing_label: &'static str,
}

pub fn run(
    providers: Providers,
    options: SessionOptions,
    handle: Handle,
    shutdown: ShutdownHandle,
) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let tick_rate = Duration::from_millis(250);
    let events = EventHandler::new(tick_rate, shutdown.clone());

    let controller = RenderController::new(Arc::clone(&providers.fetcher));
    let mut app = App::new(controller, options.image_base_url);
    app.set_listing_label(options.listing_label);

    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    app.set_command_sender(command_tx);
    handle.spawn(command_worker(
        command_rx,
        providers.fetcher,
        Arc::new(providers.archive),
        events.sender(),
    ));

    let shutdown_events = events.sender();
    let shutdown_wait = shutdown.clone();
    handle.spawn(async move {
        shutdown_wait.wait().await;
        let _ = shutdown_events.send(AppEvent::Shutdown);
    });

    app.start(options.initial);

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Tick) | Ok(AppEvent::Resize(_, _)) => {}
            Ok(AppEvent::PageLoaded { ticket, result }) => app.on_page_loaded(ticket, result),
            Ok(AppEvent::ItemLoaded(panel)) => app.on_item_loaded(*panel),
            Ok(AppEvent::Shutdown) => app.request_quit(),
            Err(std_mpsc::RecvTimeoutError::Timeout) => {}
            Err(std_mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    info!("Leaving UI loop");
    shutdown.signal();
    drop(guard);
    Ok(())
}

/// Runs UI commands as tasks and posts their results back as events.
async fn command_worker(
    mut commands: mpsc::Receiver<UiCommand>,
    fetcher: Arc<dyn Fetcher>,
    archive: Arc<ArchiveClient>,
    events: std_mpsc::Sender<AppEvent>,
) {
    while let Some(command) = commands.recv().await {
        let events = events.clone();
        match command {
            UiCommand::Fetch { ticket } => {
                let fetcher = Arc::clone(&fetcher);
                tokio::spawn(async move {
                    let result = fetcher
                        .fetch(ticket.target.page, &ticket.target.query)
                        .await;
                    let _ = events.send(AppEvent::PageLoaded { ticket, result });
                });
            }
            UiCommand::Lookup { item } => {
                let fetcher = Arc::clone(&fetcher);
                let archive = Arc::clone(&archive);
                tokio::spawn(async move {
                    let panel = open_item(fetcher.as_ref(), Some(archive.as_ref()), item).await;
                    let _ = events.send(AppEvent::ItemLoaded(Box::new(panel)));
                });
            }
        }
    }
    debug!("Command channel closed");
}
