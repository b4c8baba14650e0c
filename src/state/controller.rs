use anyhow::Result;
use chrono::{NaiveDate, TimeZone};

use super::{CalendarAction, CalendarState, FetchRequest};
use crate::layout::{GridWindow, WeekLayout};
use crate::models::event::Event;
use crate::services::source::EventSource;

/// Owns a [`CalendarState`] and loads the visible week from an [`EventSource`].
///
/// Fetching is split into `begin_fetch` / `complete_fetch` so callers that
/// run the request elsewhere still get stale results discarded; `refresh`
/// does both inline.
pub struct CalendarController<S, Tz>
where
    S: EventSource,
    Tz: TimeZone,
{
    source: S,
    tz: Tz,
    state: CalendarState,
}

impl<S, Tz> CalendarController<S, Tz>
where
    S: EventSource,
    Tz: TimeZone,
{
    pub fn new(source: S, tz: Tz, today: NaiveDate, first_day_of_week: u8) -> Self {
        Self {
            source,
            tz,
            state: CalendarState::new(today, first_day_of_week),
        }
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn dispatch(&mut self, action: CalendarAction) {
        self.state.apply(action);
    }

    /// Issue a fetch for the current week and return its ticket.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        let range = self.state.week_range(&self.tz);
        self.dispatch(CalendarAction::BeginFetch(range));

        let generation = self.state.generation();
        FetchRequest { generation, range }
    }

    /// Apply a fetch outcome. Returns `false` when the request was superseded.
    pub fn complete_fetch(&mut self, request: &FetchRequest, result: Result<Vec<Event>>) -> bool {
        let current = self
            .state
            .in_flight()
            .is_some_and(|in_flight| in_flight.generation == request.generation);

        let action = match result {
            Ok(events) => CalendarAction::FetchSucceeded {
                generation: request.generation,
                events,
            },
            Err(err) => {
                if current {
                    log::warn!("Failed to fetch events: {:#}", err);
                }
                CalendarAction::FetchFailed {
                    generation: request.generation,
                    message: err.to_string(),
                }
            }
        };
        self.dispatch(action);
        current
    }

    /// Fetch the current week synchronously.
    pub fn refresh(&mut self) -> bool {
        let request = self.begin_fetch();
        let result = self.source.list_events(Some(request.range));
        self.complete_fetch(&request, result)
    }

    pub fn next_week(&mut self) -> bool {
        self.dispatch(CalendarAction::NextWeek);
        self.refresh()
    }

    pub fn prev_week(&mut self) -> bool {
        self.dispatch(CalendarAction::PrevWeek);
        self.refresh()
    }

    pub fn go_to_today(&mut self, today: NaiveDate) -> bool {
        self.dispatch(CalendarAction::Today(today));
        self.refresh()
    }

    pub fn week_layout(&self, window: GridWindow) -> WeekLayout<'_> {
        self.state.week_layout(&self.tz, window)
    }
}
