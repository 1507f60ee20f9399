//! Reconciles [`SearchState`] with fetch results.
//!
//! Every fetch is issued as a [`FetchTicket`] carrying a sequence number and
//! the page/query it targets. A resolved fetch is applied only if its ticket
//! is the most recently issued one; older results are discarded even when
//! they arrive last.
//!
//! A page past the provider's last page is never committed: the fetch is
//! re-issued for the last page, so the state always names data that was
//! actually fetched.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::state::{FetchTarget, SearchState};
use super::BrowseEvent;
use crate::catalog::{Fetcher, ResultItem, ResultPage, TransportError};

/// Outcome of one render cycle on the listing path.
#[derive(Debug)]
pub enum RenderResult {
    /// At least one item with a poster.
    Ok(Vec<ResultItem>),
    /// The fetch succeeded but nothing survived poster filtering.
    Empty,
    /// The fetch failed; state was left untouched.
    Failed(TransportError),
}

impl RenderResult {
    pub fn is_failed(&self) -> bool {
        matches!(self, RenderResult::Failed(_))
    }
}

/// Handle for one issued fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub target: FetchTarget,
}

/// What happened to a resolved fetch.
#[derive(Debug)]
pub enum Resolution {
    Applied(RenderResult),
    /// A newer ticket was issued before this one resolved.
    Superseded,
    /// The requested page was past the last page. The carried ticket
    /// targets the last page and is now the latest one.
    Reissued(FetchTicket),
}

pub struct RenderController {
    fetcher: Arc<dyn Fetcher>,
    state: SearchState,
    latest_seq: u64,
}

impl RenderController {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            state: SearchState::default(),
            latest_seq: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn fetcher_name(&self) -> &'static str {
        self.fetcher.name()
    }

    /// Issue a ticket for `event`, or `None` if the event does not fetch.
    pub fn issue(&mut self, event: &BrowseEvent) -> Option<FetchTicket> {
        let target = self.state.target(event)?;
        Some(self.issue_target(target))
    }

    pub fn issue_target(&mut self, target: FetchTarget) -> FetchTicket {
        self.latest_seq += 1;
        debug!(seq = self.latest_seq, page = target.page, query = %target.query, "Issued fetch");
        FetchTicket {
            seq: self.latest_seq,
            target,
        }
    }

    pub fn is_latest(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.latest_seq
    }

    /// Apply a resolved fetch if `ticket` is still the latest one issued.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: Result<ResultPage, TransportError>,
    ) -> Resolution {
        if !self.is_latest(&ticket) {
            info!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "Discarding superseded fetch result"
            );
            return Resolution::Superseded;
        }
        match self.settle(ticket, result) {
            Ok(render) => Resolution::Applied(render),
            Err(next) => Resolution::Reissued(next),
        }
    }

    /// Fetch `page` for `query` and reconcile state with the outcome.
    pub async fn render(&mut self, page: u32, query: &str) -> RenderResult {
        let mut ticket = self.issue_target(FetchTarget {
            page: page.max(1),
            query: query.to_string(),
        });
        // `&mut self` is held across the await, so no newer ticket exists.
        // Each re-issue targets a strictly lower page, so this ends.
        loop {
            let result = self
                .fetcher
                .fetch(ticket.target.page, &ticket.target.query)
                .await;
            match self.settle(ticket, result) {
                Ok(render) => return render,
                Err(next) => ticket = next,
            }
        }
    }

    /// Run a navigation event to completion. `None` for events that do
    /// not fetch.
    pub async fn dispatch(&mut self, event: BrowseEvent) -> Option<RenderResult> {
        let target = self.state.target(&event)?;
        Some(self.render(target.page, &target.query).await)
    }

    /// Apply `result`, or issue a ticket for the last page when the
    /// requested one does not exist.
    fn settle(
        &mut self,
        ticket: FetchTicket,
        result: Result<ResultPage, TransportError>,
    ) -> Result<RenderResult, FetchTicket> {
        if let Ok(page) = &result {
            if ticket.target.page > page.total_pages {
                info!(
                    requested = ticket.target.page,
                    last = page.total_pages,
                    "Requested page is past the last page"
                );
                return Err(self.issue_target(FetchTarget {
                    page: page.total_pages,
                    query: ticket.target.query,
                }));
            }
        }
        Ok(self.apply(ticket.target, result))
    }

    fn apply(
        &mut self,
        target: FetchTarget,
        result: Result<ResultPage, TransportError>,
    ) -> RenderResult {
        match result {
            Ok(page) => {
                self.state.commit(target, page.total_pages);
                let fetched = page.items.len();
                let items: Vec<ResultItem> = page
                    .items
                    .into_iter()
                    .filter(|item| item.poster.is_some())
                    .collect();
                debug!(
                    fetcher = self.fetcher.name(),
                    fetched,
                    kept = items.len(),
                    page = self.state.page(),
                    total_pages = self.state.total_pages(),
                    "Fetch applied"
                );
                if items.is_empty() {
                    RenderResult::Empty
                } else {
                    RenderResult::Ok(items)
                }
            }
            Err(err) => {
                warn!(fetcher = self.fetcher.name(), error = %err, "Fetch failed");
                RenderResult::Failed(err)
            }
        }
    }
}
