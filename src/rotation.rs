//! Weekly PM rotation.
//!
//! Active assets, ordered by rotation slot, are split into [`GROUP_COUNT`]
//! contiguous groups of `ceil(total / GROUP_COUNT)` assets. Week `w` inspects
//! group `(w - 1) mod GROUP_COUNT`. Nothing here is persisted: adding or
//! deactivating an asset reshuffles every future group.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

pub const GROUP_COUNT: usize = 4;

/// 1-based count of 7-day periods since the rotation reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct WeekNumber(u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidWeekNumber(pub String);

impl fmt::Display for InvalidWeekNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week number must be a positive integer, got {:?}", self.0)
    }
}

impl std::error::Error for InvalidWeekNumber {}

impl WeekNumber {
    pub const FIRST: WeekNumber = WeekNumber(1);

    pub fn new(value: u32) -> Option<Self> {
        (value >= 1).then_some(WeekNumber(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Index of the rotation group inspected this week.
    pub fn group_index(self) -> usize {
        (self.0 as usize - 1) % GROUP_COUNT
    }
}

impl TryFrom<u32> for WeekNumber {
    type Error = InvalidWeekNumber;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        WeekNumber::new(value).ok_or_else(|| InvalidWeekNumber(value.to_string()))
    }
}

impl From<WeekNumber> for u32 {
    fn from(week: WeekNumber) -> Self {
        week.0
    }
}

impl FromStr for WeekNumber {
    type Err = InvalidWeekNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(WeekNumber::new)
            .ok_or_else(|| InvalidWeekNumber(s.to_string()))
    }
}

impl fmt::Display for WeekNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Selects the slice of `active` due for inspection in `week`.
///
/// `active` must already be ordered by rotation slot. Trailing groups may be
/// shorter than the others, or empty when there are fewer than
/// `GROUP_COUNT` assets.
pub fn rotation_group<T>(week: WeekNumber, active: &[T]) -> &[T] {
    if active.is_empty() {
        return &[];
    }

    let size = active.len().div_ceil(GROUP_COUNT);
    let start = (week.group_index() * size).min(active.len());
    let end = (start + size).min(active.len());

    &active[start..end]
}

/// Week arithmetic anchored on a fixed reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    reference: NaiveDate,
}

impl Schedule {
    pub fn new(reference: NaiveDate) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// Elapsed whole weeks since the reference date, plus one.
    /// Dates before the reference date count as week 1.
    pub fn week_of(&self, date: NaiveDate) -> WeekNumber {
        let days = (date - self.reference).num_days();
        if days < 0 {
            return WeekNumber::FIRST;
        }

        u32::try_from(days / 7 + 1)
            .ok()
            .and_then(WeekNumber::new)
            .unwrap_or(WeekNumber(u32::MAX))
    }

    pub fn current_week(&self) -> WeekNumber {
        self.week_of(chrono::Local::now().date_naive())
    }

    /// First calendar day of `week`, or `None` past the end of the calendar.
    pub fn week_start(&self, week: WeekNumber) -> Option<NaiveDate> {
        let offset = u64::from(week.get() - 1) * 7;
        self.reference.checked_add_days(Days::new(offset))
    }

    /// Human label such as `Week 02 - Jan 2024` (ISO week of the week start).
    pub fn calendar_label(&self, week: WeekNumber) -> String {
        match self.week_start(week) {
            Some(start) => start.format("Week %V - %b %Y").to_string(),
            None => format!("Week {week}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week(n: u32) -> WeekNumber {
        WeekNumber::new(n).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ten_assets_split_three_three_three_one() {
        let assets: Vec<u32> = (1..=10).collect();

        assert_eq!(rotation_group(week(1), &assets), &[1, 2, 3]);
        assert_eq!(rotation_group(week(2), &assets), &[4, 5, 6]);
        assert_eq!(rotation_group(week(3), &assets), &[7, 8, 9]);
        assert_eq!(rotation_group(week(4), &assets), &[10]);
        assert_eq!(rotation_group(week(5), &assets), &[1, 2, 3]);
    }

    #[test]
    fn groups_repeat_every_four_weeks() {
        let assets: Vec<u32> = (1..=13).collect();
        for w in 1..=8 {
            for k in 0..5 {
                assert_eq!(
                    rotation_group(week(w), &assets),
                    rotation_group(week(w + 4 * k), &assets),
                    "week {w} vs week {}",
                    w + 4 * k
                );
            }
        }
    }

    #[test]
    fn four_consecutive_weeks_partition_the_assets() {
        for total in [0usize, 1, 3, 4, 8, 10, 17, 40] {
            let assets: Vec<usize> = (0..total).collect();
            for first in 1..=4 {
                let mut seen: Vec<usize> = (first..first + 4)
                    .flat_map(|w| rotation_group(week(w), &assets).to_vec())
                    .collect();
                seen.sort_unstable();
                assert_eq!(seen, assets, "total {total}, starting week {first}");
            }
        }
    }

    #[test]
    fn evenly_divisible_groups_are_equal_sized() {
        let assets: Vec<u32> = (1..=12).collect();
        for w in 1..=4 {
            assert_eq!(rotation_group(week(w), &assets).len(), 3);
        }
    }

    #[test]
    fn fewer_assets_than_groups_leaves_trailing_weeks_empty() {
        let assets = ["a", "b"];
        assert_eq!(rotation_group(week(1), &assets), &["a"]);
        assert_eq!(rotation_group(week(2), &assets), &["b"]);
        assert!(rotation_group(week(3), &assets).is_empty());
        assert!(rotation_group(week(4), &assets).is_empty());
    }

    #[test]
    fn no_assets_yields_empty_group() {
        let assets: [u8; 0] = [];
        assert!(rotation_group(week(7), &assets).is_empty());
    }

    #[test]
    fn week_numbers_advance_every_seven_days() {
        let schedule = Schedule::new(date(2024, 1, 1));

        assert_eq!(schedule.week_of(date(2024, 1, 1)), week(1));
        assert_eq!(schedule.week_of(date(2024, 1, 7)), week(1));
        assert_eq!(schedule.week_of(date(2024, 1, 8)), week(2));
        assert_eq!(schedule.week_of(date(2024, 12, 30)), week(53));
    }

    #[test]
    fn dates_before_reference_are_week_one() {
        let schedule = Schedule::new(date(2024, 1, 1));
        assert_eq!(schedule.week_of(date(2023, 6, 1)), WeekNumber::FIRST);
    }

    #[test]
    fn week_start_and_label() {
        let schedule = Schedule::new(date(2024, 1, 1));

        assert_eq!(schedule.week_start(week(2)), Some(date(2024, 1, 8)));
        assert_eq!(schedule.calendar_label(week(1)), "Week 01 - Jan 2024");
        assert_eq!(schedule.calendar_label(week(10)), "Week 10 - Mar 2024");
    }

    #[test]
    fn parse_rejects_non_positive_and_garbage() {
        assert_eq!("3".parse::<WeekNumber>(), Ok(week(3)));
        assert_eq!(" 12 ".parse::<WeekNumber>(), Ok(week(12)));
        assert!("0".parse::<WeekNumber>().is_err());
        assert!("-2".parse::<WeekNumber>().is_err());
        assert!("abc".parse::<WeekNumber>().is_err());
        assert!("".parse::<WeekNumber>().is_err());
    }

    #[test]
    fn deserialize_rejects_zero() {
        assert!(serde_json::from_str::<WeekNumber>("0").is_err());
        assert_eq!(serde_json::from_str::<WeekNumber>("4").unwrap(), week(4));
    }
}
