//! `ratatui-date-list` renders a scrollable list of calendar days for ratatui apps.
//!
//! The list covers every day of a [`dates::DateRange`], newest first, and only draws the rows
//! that are on screen. Each row can be annotated by a [`provider::DateDataProvider`] and drawn by
//! a caller-supplied content callback. One day at a time can be selected by tapping it (mouse
//! click, or Enter/Space on the cursor row); tapping it again clears the selection.
//!
//! ## Selection is yours
//!
//! [`view::DateList`] does not hold the selected day. Pass your `Option<NaiveDate>` into
//! `render` and `handle_event`, and store the value from
//! [`view::DateListAction::SelectionChanged`] (or call [`view::DateListAction::apply`]).
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use ratatui_date_list::dates::DateRange;
//! use ratatui_date_list::view::DateList;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let list = DateList::new(DateRange::until_today(start).unwrap());
//! let mut selected: Option<NaiveDate> = None;
//! list.tap(start, selected).apply(&mut selected);
//! assert_eq!(selected, Some(start));
//! ```
//!
//! ## Providers and calendars
//!
//! A [`provider::DayDataProvider`] receives day, month and year as numbered by its own
//! [`calendar::Calendar`], so providers for other calendars (e.g. [`calendar::Minguo`]) get the
//! components they expect.
pub use ratatui_date_list_core as core;

pub mod calendar;
pub mod dates;
pub mod provider;
pub mod view;
