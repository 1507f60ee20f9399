use std::ops::RangeInclusive;

use super::SearchState;

/// How many page numbers to show on each side of the current page.
const SPREAD: u32 = 2;

/// One clickable pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    First,
    Prev(u32),
    Page { number: u32, current: bool },
    Next(u32),
    Last(u32),
}

impl PageControl {
    /// Page this control navigates to.
    pub fn target(&self) -> u32 {
        match *self {
            PageControl::First => 1,
            PageControl::Prev(page)
            | PageControl::Next(page)
            | PageControl::Last(page)
            | PageControl::Page { number: page, .. } => page,
        }
    }

    pub fn label(&self) -> String {
        match self {
            PageControl::First => "« First".to_string(),
            PageControl::Prev(_) => "‹ Prev".to_string(),
            PageControl::Page { number, .. } => number.to_string(),
            PageControl::Next(_) => "Next ›".to_string(),
            PageControl::Last(_) => "Last »".to_string(),
        }
    }
}

/// Page controls derived from a [`SearchState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub current: u32,
    pub total: u32,
    pub show_first_prev: bool,
    pub pages: RangeInclusive<u32>,
    pub show_next_last: bool,
}

impl PageWindow {
    pub fn new(page: u32, total_pages: u32) -> Self {
        let current = page.max(1);
        let total = total_pages.max(1);
        let start = current.saturating_sub(SPREAD).max(1);
        let end = current.saturating_add(SPREAD).min(total);

        Self {
            current,
            total,
            show_first_prev: current > 1,
            pages: start..=end,
            show_next_last: current < total,
        }
    }

    pub fn for_state(state: &SearchState) -> Self {
        Self::new(state.page(), state.total_pages())
    }

    /// Controls in display order. The page range is empty when the current
    /// page lies past the last page.
    pub fn controls(&self) -> Vec<PageControl> {
        let mut controls = Vec::new();
        if self.show_first_prev {
            controls.push(PageControl::First);
            controls.push(PageControl::Prev(self.current - 1));
        }
        controls.extend(self.pages.clone().map(|number| PageControl::Page {
            number,
            current: number == self.current,
        }));
        if self.show_next_last {
            controls.push(PageControl::Next(self.current + 1));
            controls.push(PageControl::Last(self.total));
        }
        controls
    }
}
