use std::iter::FusedIterator;

use chrono::DateTime;
use chrono::Days;
use chrono::Local;
use chrono::NaiveDate;
use chrono::TimeZone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DateRangeError {
    /// The last day comes before the first one.
    #[error("invalid date range: end ({end}) is before start ({start})")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// Every calendar day from `start` through `end`, both inclusive.
///
/// Index `0` is `start` and index `len() - 1` is `end`. Lists show the range newest first, so
/// [`DateRange::get_reversed`] and [`DateRange::rows`] are the display-order accessors.
///
/// A range always holds at least one day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
    len: usize,
}

impl DateRange {
    /// # Errors
    /// Returns [`DateRangeError::EndBeforeStart`] if `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        let days = end.signed_duration_since(start).num_days();
        if days < 0 {
            return Err(DateRangeError::EndBeforeStart { start, end });
        }
        let len = days as usize + 1;
        tracing::debug!(%start, %end, len, "date range created");
        Ok(Self { start, end, len })
    }

    /// A range ending on today's date in the local time zone.
    ///
    /// # Errors
    /// Returns [`DateRangeError::EndBeforeStart`] if `start` is in the future.
    pub fn until_today(start: NaiveDate) -> Result<Self, DateRangeError> {
        Self::new(start, Local::now().date_naive())
    }

    /// A range over the days two instants fall on. Time of day is dropped before counting, so
    /// the day `end` falls on is always included.
    ///
    /// # Errors
    /// Returns [`DateRangeError::EndBeforeStart`] if `end` falls on an earlier day than `start`.
    pub fn from_datetimes<Tz: TimeZone>(
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
    ) -> Result<Self, DateRangeError> {
        Self::new(start.date_naive(), end.date_naive())
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; kept alongside `len` for the usual collection API.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The day `index` days after `start`.
    pub fn get(&self, index: usize) -> Option<NaiveDate> {
        if index >= self.len {
            return None;
        }
        self.start.checked_add_days(Days::new(index as u64))
    }

    /// The day shown on display row `row`; row `0` is `end`.
    pub fn get_reversed(&self, row: usize) -> Option<NaiveDate> {
        let index = self.len.checked_sub(row)?.checked_sub(1)?;
        self.get(index)
    }

    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        Some(date.signed_duration_since(self.start).num_days() as usize)
    }

    /// The display row `date` is shown on.
    pub fn row_of(&self, date: NaiveDate) -> Option<usize> {
        self.index_of(date).map(|i| self.len - 1 - i)
    }

    /// Days in index order, oldest first.
    pub fn iter(&self) -> Iter {
        Iter {
            range: *self,
            front: 0,
            back: self.len,
        }
    }

    /// Days in display order, newest first.
    pub fn rows(&self) -> std::iter::Rev<Iter> {
        self.iter().rev()
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl IntoIterator for &DateRange {
    type Item = NaiveDate;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

/// Iterator over a [`DateRange`], see [`DateRange::iter`].
#[derive(Clone, Debug)]
pub struct Iter {
    range: DateRange,
    front: usize,
    back: usize,
}

impl Iterator for Iter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.front >= self.back {
            return None;
        }
        let date = self.range.get(self.front);
        self.front += 1;
        date
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back.saturating_sub(self.front);
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<NaiveDate> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for Iter {
    fn next_back(&mut self) -> Option<NaiveDate> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.range.get(self.back)
    }
}

impl ExactSizeIterator for Iter {}

impl FusedIterator for Iter {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn three_days_newest_first() {
        let r = DateRange::new(date(2024, 1, 1), date(2024, 1, 3)).unwrap();
        assert_eq!(r.len(), 3);
        let rows: Vec<_> = r.rows().collect();
        assert_eq!(rows, vec![date(2024, 1, 3), date(2024, 1, 2), date(2024, 1, 1)]);
    }

    #[test]
    fn single_day_range() {
        let d = date(2024, 6, 15);
        let r = DateRange::new(d, d).unwrap();
        assert_eq!(r.len(), 1);
        assert!(!r.is_empty());
        assert_eq!(r.get(0), Some(d));
        assert_eq!(r.get_reversed(0), Some(d));
        assert_eq!(r.get(1), None);
    }

    #[test]
    fn end_before_start_is_rejected() {
        let err = DateRange::new(date(2024, 1, 3), date(2024, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            DateRangeError::EndBeforeStart {
                start: date(2024, 1, 3),
                end: date(2024, 1, 1),
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid date range: end (2024-01-01) is before start (2024-01-03)"
        );
    }

    #[test]
    fn count_spans_leap_day_and_year_end() {
        let r = DateRange::new(date(2023, 12, 30), date(2024, 3, 1)).unwrap();
        // 2 days of 2023, 31 + 29 + 1 of 2024
        assert_eq!(r.len(), 2 + 31 + 29 + 1);
        assert_eq!(r.get(2 + 31 + 28), Some(date(2024, 2, 29)));
    }

    #[test]
    fn get_adds_calendar_days() {
        let start = date(2024, 3, 30);
        let r = DateRange::new(start, date(2024, 4, 2)).unwrap();
        for (i, d) in r.iter().enumerate() {
            assert_eq!(d, start + Days::new(i as u64));
            assert_eq!(r.get(i), Some(d));
        }
    }

    #[test]
    fn reversed_and_index_lookups_agree() {
        let r = DateRange::new(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        for row in 0..r.len() {
            let d = r.get_reversed(row).unwrap();
            assert_eq!(r.row_of(d), Some(row));
            assert_eq!(r.index_of(d), Some(r.len() - 1 - row));
        }
        assert_eq!(r.get_reversed(r.len()), None);
        assert_eq!(r.row_of(date(2024, 1, 11)), None);
        assert_eq!(r.index_of(date(2023, 12, 31)), None);
    }

    #[test]
    fn iterator_is_double_ended_and_exact() {
        let r = DateRange::new(date(2024, 1, 1), date(2024, 1, 5)).unwrap();
        let mut it = r.iter();
        assert_eq!(it.len(), 5);
        assert_eq!(it.next(), Some(date(2024, 1, 1)));
        assert_eq!(it.next_back(), Some(date(2024, 1, 5)));
        assert_eq!(it.len(), 3);
        assert_eq!(it.nth(1), Some(date(2024, 1, 3)));
        assert_eq!(it.next(), Some(date(2024, 1, 4)));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn datetimes_keep_the_end_day() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        // Less than 48 hours apart, but touching three calendar days.
        let start = tz.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap();
        let end = tz.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap();
        let r = DateRange::from_datetimes(&start, &end).unwrap();
        assert_eq!(r.len(), 3);
        assert_eq!(r.get_reversed(0), Some(date(2024, 1, 3)));
    }

    #[test]
    fn until_today_ends_today() {
        let today = Local::now().date_naive();
        let start = today - Days::new(6);
        let r = DateRange::until_today(start).unwrap();
        // A midnight rollover between the two `now()` calls adds one day.
        assert!(r.len() == 7 || r.len() == 8);
        assert_eq!(r.start(), start);
    }
}
