//! Week paging and day grouping for the availability view.

use chrono::{Datelike, Days, NaiveDate, TimeZone};

use crate::api::Slot;

/// Weeks ahead of the current one. Past weeks cannot be shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekCursor {
    offset: u32,
}

impl WeekCursor {
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn can_go_back(&self) -> bool {
        self.offset > 0
    }

    /// Returns false (and stays put) on the current week.
    pub fn previous(&mut self) -> bool {
        if self.can_go_back() {
            self.offset -= 1;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) {
        self.offset = self.offset.saturating_add(1);
    }

    pub fn range(&self, today: NaiveDate) -> WeekRange {
        let shifted = today
            .checked_add_days(Days::new(u64::from(self.offset) * 7))
            .unwrap_or(NaiveDate::MAX);
        WeekRange::containing(shifted)
    }
}

/// Monday through Sunday, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    pub fn containing(date: NaiveDate) -> Self {
        let back = u64::from(date.weekday().num_days_from_monday());
        let start = date.checked_sub_days(Days::new(back)).unwrap_or(date);
        let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
        Self { start, end }
    }

    /// `weekStart` query value, e.g. `2024-06-03`.
    pub fn query_value(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// e.g. `Jun 3 - Jun 9, 2024`
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%b %-d"),
            self.end.format("%b %-d, %Y")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySlots {
    pub day: NaiveDate,
    pub slots: Vec<Slot>,
}

/// Group slots by calendar day in `tz`, keeping the order the API returned.
pub fn group_by_day<Tz: TimeZone>(slots: &[Slot], tz: &Tz) -> Vec<DaySlots> {
    let mut days: Vec<DaySlots> = Vec::new();
    for slot in slots {
        let day = slot.with_timezone(tz).date_naive();
        match days.iter_mut().find(|d| d.day == day) {
            Some(existing) => existing.slots.push(*slot),
            None => days.push(DaySlots {
                day,
                slots: vec![*slot],
            }),
        }
    }
    days
}

/// e.g. `10:00 AM`
pub fn format_time<Tz: TimeZone>(slot: &Slot, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    slot.with_timezone(tz).format("%-I:%M %p").to_string()
}

/// e.g. `Mon, Jun 3`
pub fn format_day_header<Tz: TimeZone>(slot: &Slot, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    slot.with_timezone(tz).format("%a, %b %-d").to_string()
}

/// e.g. `Mon, Jun 3, 2024, 10:00 AM`
pub fn format_date_time<Tz: TimeZone>(at: &Slot, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.with_timezone(tz).format("%a, %b %-d, %Y, %-I:%M %p").to_string()
}

pub fn slot_count_label(count: usize) -> String {
    if count == 1 {
        "1 slot available".to_string()
    } else {
        format!("{} slots available", count)
    }
}
