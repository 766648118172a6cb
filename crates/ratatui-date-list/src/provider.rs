//! Per-day annotations for a [`DateList`](crate::view::DateList).
//!
//! The list asks its provider for a value every time it draws a row and every time a row is
//! tapped. It never caches the result, so providers are free to compute on demand or return
//! something different on each call (see [`RandomNumber`]).

use std::cell::RefCell;

use chrono::NaiveDate;

use crate::calendar::Calendar;
use crate::calendar::Gregorian;

/// Anything that can produce a value for a date. This is what the list consumes.
pub trait DateDataProvider {
    type Output;

    fn data(&self, date: NaiveDate) -> Self::Output;
}

/// A provider that works on calendar components rather than whole dates.
///
/// The date is split with the provider's own [`calendar`](DayDataProvider::calendar), so a provider
/// built for a non-Gregorian calendar sees the numbers it expects. Every `DayDataProvider` is a
/// [`DateDataProvider`].
pub trait DayDataProvider {
    type Output;

    fn calendar(&self) -> &dyn Calendar {
        &Gregorian
    }

    fn data_for(&self, day: u32, month: u32, year: i32) -> Self::Output;
}

impl<P: DayDataProvider + ?Sized> DateDataProvider for P {
    type Output = P::Output;

    fn data(&self, date: NaiveDate) -> Self::Output {
        let c = self.calendar().components(date);
        self.data_for(c.day, c.month, c.year)
    }
}

/// Produces nothing; the default for plain date lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmptyDataProvider;

impl DayDataProvider for EmptyDataProvider {
    type Output = ();

    fn data_for(&self, _day: u32, _month: u32, _year: i32) {}
}

/// `"year:month:day"` on days divisible by four, nothing otherwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct EveryFourthDay<C = Gregorian> {
    calendar: C,
}

impl EveryFourthDay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Calendar> EveryFourthDay<C> {
    pub fn with_calendar(calendar: C) -> Self {
        Self { calendar }
    }
}

impl<C: Calendar> DayDataProvider for EveryFourthDay<C> {
    type Output = Option<String>;

    fn calendar(&self) -> &dyn Calendar {
        &self.calendar
    }

    fn data_for(&self, day: u32, month: u32, year: i32) -> Option<String> {
        if day % 4 != 0 {
            return None;
        }
        Some(format!("{year}:{month}:{day}"))
    }
}

/// The day of the month modulo four.
#[derive(Clone, Copy, Debug, Default)]
pub struct EveryFourthDayCount<C = Gregorian> {
    calendar: C,
}

impl EveryFourthDayCount {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Calendar> EveryFourthDayCount<C> {
    pub fn with_calendar(calendar: C) -> Self {
        Self { calendar }
    }
}

impl<C: Calendar> DayDataProvider for EveryFourthDayCount<C> {
    type Output = u32;

    fn calendar(&self) -> &dyn Calendar {
        &self.calendar
    }

    fn data_for(&self, day: u32, _month: u32, _year: i32) -> u32 {
        day % 4
    }
}

/// Half the time a number in `0..=10`, otherwise nothing. A new draw on every call.
#[derive(Clone, Debug, Default)]
pub struct RandomNumber<C = Gregorian> {
    calendar: C,
    rng: RefCell<fastrand::Rng>,
}

impl RandomNumber {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Calendar> RandomNumber<C> {
    pub fn with_calendar(calendar: C) -> Self {
        Self {
            calendar,
            rng: RefCell::new(fastrand::Rng::new()),
        }
    }

    /// Reseeds the generator so the sequence of draws is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RefCell::new(fastrand::Rng::with_seed(seed));
        self
    }
}

impl<C: Calendar> DayDataProvider for RandomNumber<C> {
    type Output = Option<u32>;

    fn calendar(&self) -> &dyn Calendar {
        &self.calendar
    }

    fn data_for(&self, _day: u32, _month: u32, _year: i32) -> Option<u32> {
        let mut rng = self.rng.borrow_mut();
        if rng.bool() {
            Some(rng.u32(0..=10))
        } else {
            None
        }
    }
}

/// Adapts a closure over whole dates.
#[derive(Clone, Copy, Debug)]
pub struct FnDataProvider<F>(pub F);

impl<F, T> DateDataProvider for FnDataProvider<F>
where
    F: Fn(NaiveDate) -> T,
{
    type Output = T;

    fn data(&self, date: NaiveDate) -> T {
        (self.0)(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Minguo;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fourth_day_count_on_the_eighth_is_zero() {
        assert_eq!(EveryFourthDayCount::new().data(date(2024, 1, 8)), 0);
        assert_eq!(EveryFourthDayCount::new().data(date(2024, 1, 7)), 3);
    }

    #[test]
    fn every_fourth_day_formats_components() {
        let p = EveryFourthDay::new();
        assert_eq!(p.data(date(2024, 1, 8)).as_deref(), Some("2024:1:8"));
        assert_eq!(p.data(date(2024, 1, 9)), None);
    }

    #[test]
    fn provider_uses_its_own_calendar() {
        let p = EveryFourthDay::with_calendar(Minguo);
        assert_eq!(p.data(date(2024, 1, 8)).as_deref(), Some("113:1:8"));
    }

    #[test]
    fn empty_provider_yields_unit() {
        let () = EmptyDataProvider.data(date(2024, 1, 1));
    }

    #[test]
    fn random_number_stays_in_bounds() {
        let p = RandomNumber::new().with_seed(7);
        let draws: Vec<_> = (0..200).map(|_| p.data(date(2024, 1, 1))).collect();
        assert!(draws.iter().flatten().all(|n| *n <= 10));
        assert!(draws.iter().any(Option::is_none));
        assert!(draws.iter().any(Option::is_some));
    }

    #[test]
    fn random_number_draws_through_a_shared_reference() {
        let a = RandomNumber::new().with_seed(42);
        let b = RandomNumber::new().with_seed(42);
        let day = date(2024, 1, 1);
        let from_a: Vec<_> = (0..32).map(|_| a.data(day)).collect();
        let from_b: Vec<_> = (0..32).map(|_| b.data(day)).collect();
        assert_eq!(from_a, from_b);
        // Repeated calls on one day keep advancing the generator.
        assert!(from_a.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn closures_are_providers() {
        let p = FnDataProvider(|d: NaiveDate| d.to_string());
        assert_eq!(p.data(date(2024, 5, 1)), "2024-05-01");
    }
}
