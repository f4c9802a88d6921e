//! Chronological view over the events of a location.

use super::fields::parse_event_date;
use crate::api::Event;
use chrono::NaiveDateTime;

/// Event with its parsed start time.
///
#[derive(Debug, PartialEq, Clone)]
pub struct ScheduledEvent<'a> {
    pub event: &'a Event,
    pub starts_at: NaiveDateTime,
}

/// Events split around a reference time.
///
#[derive(Debug, Default, PartialEq)]
pub struct Schedule<'a> {
    pub upcoming: Vec<ScheduledEvent<'a>>, // Soonest first
    pub past: Vec<ScheduledEvent<'a>>,     // Most recent first
    pub undated: Vec<&'a Event>,
}

impl<'a> Schedule<'a> {
    /// Build the schedule of the events relative to `now`. Events starting
    /// exactly at `now` count as upcoming.
    ///
    pub fn build(events: &'a [Event], now: NaiveDateTime) -> Self {
        let mut schedule = Schedule::default();
        for event in events {
            match event.date.as_deref().and_then(parse_event_date) {
                Some(starts_at) if starts_at >= now => schedule
                    .upcoming
                    .push(ScheduledEvent { event, starts_at }),
                Some(starts_at) => schedule.past.push(ScheduledEvent { event, starts_at }),
                None => schedule.undated.push(event),
            }
        }
        schedule
            .upcoming
            .sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then(a.event.id.cmp(&b.event.id)));
        schedule
            .past
            .sort_by(|a, b| b.starts_at.cmp(&a.starts_at).then(a.event.id.cmp(&b.event.id)));
        schedule
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.past.is_empty() && self.undated.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    fn event(id: u64, date: Option<&str>) -> Event {
        let mut event: Event = Faker.fake();
        event.id = id;
        event.date = date.map(str::to_string);
        event
    }

    fn at(text: &str) -> NaiveDateTime {
        parse_event_date(text).unwrap()
    }

    #[test]
    fn splits_and_orders_events() {
        let events = vec![
            event(1, Some("2026-12-01 20:00")),
            event(2, Some("2026-10-01 19:00")),
            event(3, Some("2026-11-01 18:00")),
            event(4, None),
            event(5, Some("2026-09-01 12:00")),
            event(6, Some("sometime")),
        ];
        let schedule = Schedule::build(&events, at("2026-10-19 12:00"));
        let upcoming: Vec<u64> = schedule.upcoming.iter().map(|s| s.event.id).collect();
        let past: Vec<u64> = schedule.past.iter().map(|s| s.event.id).collect();
        let undated: Vec<u64> = schedule.undated.iter().map(|e| e.id).collect();
        assert_eq!(upcoming, vec![3, 1]);
        assert_eq!(past, vec![2, 5]);
        assert_eq!(undated, vec![4, 6]);
    }

    #[test]
    fn event_starting_now_is_upcoming() {
        let events = vec![event(1, Some("2026-10-19 12:00"))];
        let schedule = Schedule::build(&events, at("2026-10-19 12:00"));
        assert_eq!(schedule.upcoming.len(), 1);
        assert!(schedule.past.is_empty());
    }

    #[test]
    fn empty_schedule() {
        let schedule = Schedule::build(&[], at("2026-10-19 12:00"));
        assert!(schedule.is_empty());
    }

    #[test]
    fn iso_dates_from_backend_are_scheduled() {
        let events = vec![
            event(1, Some("2026-12-01T20:00:00")),
            event(2, Some("2026-09-30T18:30:00")),
            event(3, Some("2026-11-15")),
        ];
        let schedule = Schedule::build(&events, at("2026-10-19 12:00"));
        let upcoming: Vec<u64> = schedule.upcoming.iter().map(|s| s.event.id).collect();
        assert_eq!(upcoming, vec![3, 1]);
        assert_eq!(schedule.past.len(), 1);
        assert_eq!(schedule.past[0].starts_at, at("2026-09-30 18:30"));
        assert!(schedule.undated.is_empty());
    }
}
