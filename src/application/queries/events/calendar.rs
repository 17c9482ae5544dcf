// src/application/queries/events/calendar.rs
use super::EventQueryService;
use crate::{
    application::{
        dto::{CalendarDayDto, EventDto},
        error::ApplicationResult,
    },
    domain::errors::DomainError,
};
use chrono::{DateTime, Months, NaiveDate, NaiveTime, Utc};
use std::collections::BTreeMap;

impl EventQueryService {
    /// Published events starting in the given month, grouped by start day.
    pub async fn calendar(&self, year: i32, month: u32) -> ApplicationResult<Vec<CalendarDayDto>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| DomainError::invalid("month", "must be between 1 and 12"))?;
        let next = first
            .checked_add_months(Months::new(1))
            .ok_or_else(|| DomainError::invalid("year", "out of range"))?;

        let events = self
            .events
            .starting_between(midnight(first), midnight(next))
            .await?;

        let mut days: BTreeMap<NaiveDate, Vec<EventDto>> = BTreeMap::new();
        for event in events {
            days.entry(event.start_date.date_naive())
                .or_default()
                .push(event.into());
        }

        Ok(days
            .into_iter()
            .map(|(date, events)| CalendarDayDto { date, events })
            .collect())
    }
}

fn midnight(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}
