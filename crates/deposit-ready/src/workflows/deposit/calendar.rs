use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// How a jurisdiction counts the days in its statutory deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayUnit {
    Calendar,
    Business,
}

impl DayUnit {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Calendar => "calendar days",
            Self::Business => "business days",
        }
    }

    /// Move `days` units forward from `from`, saturating at the last representable date.
    pub fn advance(self, from: NaiveDate, days: u32) -> NaiveDate {
        let advanced = match self {
            Self::Calendar => from.checked_add_days(Days::new(u64::from(days))),
            Self::Business => BusinessCalendar::add_business_days(from, days),
        };

        advanced.unwrap_or(NaiveDate::MAX)
    }
}

/// Business calendar for deadlines counted in business days.
///
/// Weekends and US federal holidays are skipped. Holidays are matched on their
/// actual date; weekend observance shifts are not applied.
pub struct BusinessCalendar;

impl BusinessCalendar {
    /// Add business days to a date. Returns `None` on date overflow.
    pub fn add_business_days(start_date: NaiveDate, days: u32) -> Option<NaiveDate> {
        let mut current_date = start_date;
        let mut remaining_days = days;

        while remaining_days > 0 {
            current_date = current_date.succ_opt()?;

            if Self::is_business_day(current_date) {
                remaining_days -= 1;
            }
        }

        Some(current_date)
    }

    pub fn is_business_day(date: NaiveDate) -> bool {
        !Self::is_weekend(date) && !Self::is_holiday(date)
    }

    fn is_weekend(date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Check if a date is a US federal holiday
    pub fn is_holiday(date: NaiveDate) -> bool {
        Self::is_fixed_holiday(date.month(), date.day()) || Self::is_floating_holiday(date)
    }

    fn is_fixed_holiday(month: u32, day: u32) -> bool {
        matches!(
            (month, day),
            (1, 1) |   // New Year's Day
            (6, 19) |  // Juneteenth
            (7, 4) |   // Independence Day
            (11, 11) | // Veterans Day
            (12, 25) // Christmas
        )
    }

    fn is_floating_holiday(date: NaiveDate) -> bool {
        const NTH_WEEKDAY_HOLIDAYS: [(u32, Weekday, u32); 5] = [
            (1, Weekday::Mon, 3),  // Martin Luther King Jr. Day
            (2, Weekday::Mon, 3),  // Washington's Birthday
            (9, Weekday::Mon, 1),  // Labor Day
            (10, Weekday::Mon, 2), // Columbus Day
            (11, Weekday::Thu, 4), // Thanksgiving
        ];

        let year = date.year();
        let nth_match = NTH_WEEKDAY_HOLIDAYS
            .iter()
            .any(|&(month, weekday, n)| {
                Self::nth_weekday_of_month(year, month, weekday, n) == Some(date)
            });

        // Memorial Day - last Monday in May
        nth_match || Self::last_weekday_of_month(year, 5, Weekday::Mon) == Some(date)
    }

    fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
        let mut current = NaiveDate::from_ymd_opt(year, month, 1)?;
        let mut count = 0;

        while current.month() == month {
            if current.weekday() == weekday {
                count += 1;
                if count == n {
                    return Some(current);
                }
            }
            current = current.succ_opt()?;
        }

        None
    }

    fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
        let mut current = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?.pred_opt()?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?.pred_opt()?
        };

        while current.month() == month {
            if current.weekday() == weekday {
                return Some(current);
            }
            current = current.pred_opt()?;
        }

        None
    }
}
