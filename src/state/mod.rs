//! Week-view UI state as a plain value driven by a closed set of actions.
//!
//! Fetches are tagged with a generation number. Starting a fetch or moving to
//! another week bumps the generation, and a completion carrying anything but
//! the in-flight generation is dropped, so a slow response for a week the
//! user already left can never overwrite newer state.

use chrono::{Duration, NaiveDate, TimeZone};
use serde::Serialize;

use crate::layout::{compute_week_layout, DateRange, GridWindow, WeekLayout};
use crate::models::event::Event;
use crate::utils::date::{day_bounds, get_week_end, get_week_start, next_week, prev_week};

mod controller;

pub use controller::CalendarController;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalMode {
    #[default]
    Create,
    Edit,
}

/// A clicked grid cell, used to prefill a new event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub hour: u32,
    pub minute: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub range: DateRange,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalendarAction {
    SetWeek(NaiveDate),
    NextWeek,
    PrevWeek,
    /// Jump to the week containing the given date (the caller's "today").
    Today(NaiveDate),
    BeginFetch(DateRange),
    FetchSucceeded { generation: u64, events: Vec<Event> },
    FetchFailed { generation: u64, message: String },
    AddEvent(Event),
    UpdateEvent(Event),
    DeleteEvent(i64),
    SelectEvent(Event),
    SelectSlot(TimeSlot),
    OpenModal(ModalMode),
    CloseModal,
    SetError(Option<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarState {
    pub current_week_start: NaiveDate,
    pub first_day_of_week: u8,
    pub events: Vec<Event>,
    pub selected_event: Option<Event>,
    pub is_modal_open: bool,
    pub modal_mode: ModalMode,
    pub selected_slot: Option<TimeSlot>,
    pub loading: bool,
    pub error: Option<String>,
    generation: u64,
    in_flight: Option<FetchRequest>,
}

impl CalendarState {
    pub fn new(today: NaiveDate, first_day_of_week: u8) -> Self {
        Self {
            current_week_start: get_week_start(today, first_day_of_week),
            first_day_of_week,
            events: Vec::new(),
            selected_event: None,
            is_modal_open: false,
            modal_mode: ModalMode::Create,
            selected_slot: None,
            loading: false,
            error: None,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn in_flight(&self) -> Option<&FetchRequest> {
        self.in_flight.as_ref()
    }

    /// Inclusive instant range covering the current week in `tz`, from the
    /// first midnight to the last millisecond before the following week.
    pub fn week_range<Tz: TimeZone>(&self, tz: &Tz) -> DateRange {
        let (start, _) = day_bounds(self.current_week_start, tz);
        let (_, after_end) = day_bounds(get_week_end(self.current_week_start), tz);
        DateRange {
            start,
            end: after_end - Duration::milliseconds(1),
        }
    }

    pub fn week_layout<Tz: TimeZone>(&self, tz: &Tz, window: GridWindow) -> WeekLayout<'_> {
        compute_week_layout(&self.events, self.current_week_start, tz, window)
    }

    pub fn apply(&mut self, action: CalendarAction) {
        match action {
            CalendarAction::SetWeek(date) => {
                let week_start = get_week_start(date, self.first_day_of_week);
                self.move_to_week(week_start);
            }
            CalendarAction::NextWeek => self.move_to_week(next_week(self.current_week_start)),
            CalendarAction::PrevWeek => self.move_to_week(prev_week(self.current_week_start)),
            CalendarAction::Today(today) => {
                let week_start = get_week_start(today, self.first_day_of_week);
                self.move_to_week(week_start);
            }
            CalendarAction::BeginFetch(range) => {
                self.generation += 1;
                self.in_flight = Some(FetchRequest {
                    generation: self.generation,
                    range,
                });
                self.loading = true;
                self.error = None;
            }
            CalendarAction::FetchSucceeded { generation, events } => {
                if self.accept_completion(generation) {
                    self.events = events;
                }
            }
            CalendarAction::FetchFailed {
                generation,
                message,
            } => {
                if self.accept_completion(generation) {
                    self.error = Some(message);
                }
            }
            CalendarAction::AddEvent(event) => self.events.push(event),
            CalendarAction::UpdateEvent(event) => {
                if let Some(existing) = self
                    .events
                    .iter_mut()
                    .find(|existing| existing.id.is_some() && existing.id == event.id)
                {
                    *existing = event;
                }
            }
            CalendarAction::DeleteEvent(id) => self.events.retain(|event| event.id != Some(id)),
            CalendarAction::SelectEvent(event) => self.selected_event = Some(event),
            CalendarAction::SelectSlot(slot) => self.selected_slot = Some(slot),
            CalendarAction::OpenModal(mode) => {
                self.is_modal_open = true;
                self.modal_mode = mode;
            }
            CalendarAction::CloseModal => {
                self.is_modal_open = false;
                self.selected_event = None;
                self.selected_slot = None;
            }
            CalendarAction::SetError(error) => self.error = error,
        }
    }

    fn move_to_week(&mut self, week_start: NaiveDate) {
        if week_start == self.current_week_start {
            return;
        }
        self.current_week_start = week_start;
        self.generation += 1;
        if self.in_flight.take().is_some() {
            log::debug!("Abandoned in-flight fetch after moving to week of {}", week_start);
        }
        self.loading = false;
    }

    fn accept_completion(&mut self, generation: u64) -> bool {
        match self.in_flight {
            Some(request) if request.generation == generation => {
                self.in_flight = None;
                self.loading = false;
                true
            }
            _ => {
                log::debug!(
                    "Dropping stale fetch result (generation {}, current {})",
                    generation,
                    self.generation
                );
                false
            }
        }
    }
}

/// Pure transition: `state` after `action`.
pub fn reduce(mut state: CalendarState, action: CalendarAction) -> CalendarState {
    state.apply(action);
    state
}
