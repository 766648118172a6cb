use chrono::DateTime;
use chrono::Datelike;
use chrono::NaiveDate;
use chrono::TimeZone;

/// The year/month/day a [`Calendar`] assigns to a date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DayComponents {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Splits a date into calendar components.
///
/// Dates are stored as proleptic Gregorian [`NaiveDate`]s. A calendar decides how a given day is
/// *named*, which is what data providers key their output on. Implementations must be total: every
/// `NaiveDate` chrono can represent has components.
pub trait Calendar {
    fn components(&self, date: NaiveDate) -> DayComponents;
}

/// The ISO / Gregorian calendar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gregorian;

impl Calendar for Gregorian {
    fn components(&self, date: NaiveDate) -> DayComponents {
        DayComponents {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

/// The Republic of China (Minguo) calendar: Gregorian months and days, years counted from 1912.
///
/// Years before 1912 come out as zero or negative; there is no separate "before Minguo" era.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Minguo;

const MINGUO_EPOCH_YEAR: i32 = 1911;

impl Calendar for Minguo {
    fn components(&self, date: NaiveDate) -> DayComponents {
        DayComponents {
            year: date.year() - MINGUO_EPOCH_YEAR,
            ..Gregorian.components(date)
        }
    }
}

impl<C: Calendar + ?Sized> Calendar for &C {
    fn components(&self, date: NaiveDate) -> DayComponents {
        (**self).components(date)
    }
}

/// Whether two instants fall on the same day in their own time zone. Time of day is ignored.
pub fn same_day<Tz: TimeZone, Tz2: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz2>) -> bool {
    a.date_naive() == b.date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn gregorian_components() {
        assert_eq!(
            Gregorian.components(date(2024, 1, 8)),
            DayComponents {
                year: 2024,
                month: 1,
                day: 8
            }
        );
    }

    #[test]
    fn minguo_shifts_only_the_year() {
        let c = Minguo.components(date(2024, 2, 29));
        assert_eq!((c.year, c.month, c.day), (113, 2, 29));
    }

    #[test]
    fn same_day_ignores_time_of_day() {
        let tz = FixedOffset::east_opt(3600).unwrap();
        let morning = tz.with_ymd_and_hms(2024, 3, 31, 0, 5, 0).unwrap();
        let night = tz.with_ymd_and_hms(2024, 3, 31, 23, 55, 0).unwrap();
        let next = tz.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        assert!(same_day(&morning, &night));
        assert!(!same_day(&night, &next));
    }
}
