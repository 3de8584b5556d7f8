//! Working-day arithmetic and the notification-date rule.

use crate::holiday_calendar::HolidayCalendar;
use crate::types::is_weekend;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Working days a department must give pre-award staff before a deadline.
pub const NOTIFICATION_LEAD_DAYS: u32 = 20;

pub fn is_working_day(calendar: &HolidayCalendar, date: NaiveDate) -> bool {
    !is_weekend(date) && !calendar.is_holiday(date)
}

/// Walk back from `end` one calendar day at a time until `n` working days
/// have been counted. `n == 0` returns `end` itself.
pub fn subtract_working_days(calendar: &HolidayCalendar, end: NaiveDate, n: u32) -> NaiveDate {
    let mut current = end;
    let mut counted = 0;
    while counted < n {
        current = match current.pred_opt() {
            Some(prev) => prev,
            None => break,
        };
        if is_working_day(calendar, current) {
            counted += 1;
        }
    }
    if !calendar.covers(end) || !calendar.covers(current) {
        log::warn!(
            "holiday calendar does not cover {current}..{end}; weekends only were skipped outside it"
        );
    }
    current
}

pub fn notification_date(calendar: &HolidayCalendar, deadline: NaiveDate) -> NaiveDate {
    subtract_working_days(calendar, deadline, NOTIFICATION_LEAD_DAYS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    AheadOfSchedule,
    DueToday,
    Overdue,
}

impl NotificationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationStatus::AheadOfSchedule => "ahead of schedule",
            NotificationStatus::DueToday        => "due today",
            NotificationStatus::Overdue         => "overdue",
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn classify_notification(notification: NaiveDate, today: NaiveDate) -> NotificationStatus {
    match notification.cmp(&today) {
        Ordering::Greater => NotificationStatus::AheadOfSchedule,
        Ordering::Equal   => NotificationStatus::DueToday,
        Ordering::Less    => NotificationStatus::Overdue,
    }
}
