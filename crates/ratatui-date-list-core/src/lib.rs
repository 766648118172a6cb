//! `ratatui-date-list-core` holds the host-side building blocks the date list is made of.
//!
//! Nothing here knows about dates. It is the terminal half: input events, key bindings, a
//! viewport, clipped rendering, and a virtualized list that draws only the rows on screen.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: all components run on the main thread.
//! - Widgets don't own app state. They report what happened through action enums and the
//!   caller decides what to store.
//!
//! Useful entry points:
//! - [`virtual_list::VirtualListView`]: large list virtualization with keyboard and mouse
//!   navigation.
//! - [`render::render_spans_clipped`]: draw a run of spans into a fixed number of columns.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod input;
pub mod keymap;
pub mod render;
pub mod viewport;
pub mod virtual_list;
