use chrono::NaiveDate;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui_date_list_core::input::InputEvent;
use ratatui_date_list_core::input::KeyCode;
use ratatui_date_list_core::input::KeyEvent;
use ratatui_date_list_core::keymap;
use ratatui_date_list_core::keymap::Binding;
use ratatui_date_list_core::render;
use ratatui_date_list_core::theme::Theme;
use ratatui_date_list_core::viewport::ViewportState;
use ratatui_date_list_core::virtual_list::VirtualListAction;
use ratatui_date_list_core::virtual_list::VirtualListView;
use ratatui_date_list_core::virtual_list::VirtualListViewOptions;

use crate::dates::DateRange;
use crate::dates::DateRangeError;
use crate::provider::DateDataProvider;
use crate::provider::EmptyDataProvider;

/// Builds the visible content of a row from `(date, data, is_selected)`.
pub type ContentFn<O> = Box<dyn Fn(NaiveDate, &O, bool) -> Line<'static>>;

/// Decides whether a tap on `(date, data)` may change the selection.
pub type ShouldSelectFn<O> = Box<dyn Fn(NaiveDate, &O) -> bool>;

/// Where a row's content sits when it is narrower than the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    #[default]
    Leading,
    Center,
    Trailing,
}

impl HorizontalAlignment {
    /// Columns to skip before content `content_w` wide, inside `available` columns.
    pub fn offset(self, available: u16, content_w: u16) -> u16 {
        let free = available.saturating_sub(content_w);
        match self {
            Self::Leading => 0,
            Self::Center => free / 2,
            Self::Trailing => free,
        }
    }
}

/// Keys that act on the selection. Movement keys belong to the underlying list.
#[derive(Clone, Debug)]
pub struct DateListBindings {
    pub toggle: Vec<KeyEvent>,
    pub clear: Vec<KeyEvent>,
}

impl Default for DateListBindings {
    fn default() -> Self {
        Self {
            toggle: vec![keymap::key(KeyCode::Enter), keymap::key_char(' ')],
            clear: vec![keymap::key(KeyCode::Esc)],
        }
    }
}

impl DateListBindings {
    pub fn is_toggle(&self, key: &KeyEvent) -> bool {
        keymap::any_matches(&self.toggle, key)
    }

    pub fn is_clear(&self, key: &KeyEvent) -> bool {
        keymap::any_matches(&self.clear, key)
    }

    /// Help entries for the keys a date list reacts to, navigation included.
    pub fn help(&self) -> Vec<Binding> {
        vec![
            Binding::new(
                "j/k",
                "move",
                vec![keymap::key_char('j'), keymap::key_char('k')],
            ),
            Binding::new(
                "g/G",
                "newest/oldest",
                vec![keymap::key_char('g'), keymap::key_char('G')],
            ),
            Binding::new("enter", "select", self.toggle.clone()),
            Binding::new("esc", "clear", self.clear.clone()),
        ]
    }
}

#[derive(Clone, Debug)]
pub struct DateListOptions {
    pub alignment: HorizontalAlignment,
    pub show_scrollbar: bool,
    pub overscan: usize,
    /// Height of every row in terminal lines. Content is drawn on the middle line.
    pub row_height: u16,
    pub style: Style,
    pub cursor_style: Style,
    /// Highlight for the selected day. `None` uses [`Theme::selected`].
    pub selected_style: Option<Style>,
    pub scrollbar_style: Style,
    pub bindings: DateListBindings,
}

impl Default for DateListOptions {
    fn default() -> Self {
        Self {
            alignment: HorizontalAlignment::Leading,
            show_scrollbar: true,
            overscan: 2,
            row_height: 1,
            style: Style::default(),
            cursor_style: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            selected_style: None,
            scrollbar_style: Style::default(),
            bindings: DateListBindings::default(),
        }
    }
}

impl DateListOptions {
    fn list_options(&self) -> VirtualListViewOptions {
        VirtualListViewOptions {
            show_scrollbar: self.show_scrollbar,
            overscan: self.overscan,
            item_size: self.row_height.max(1) as u32,
            style: self.style,
            scrollbar_style: self.scrollbar_style,
            cursor_style: self.cursor_style,
            ..VirtualListViewOptions::default()
        }
    }
}

/// What a [`DateList`] wants the caller to do after an event.
///
/// The list never stores the selection. `SelectionChanged` carries the value the caller should
/// store next; [`DateListAction::apply`] does that for a plain `Option<NaiveDate>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateListAction {
    None,
    Redraw,
    SelectionChanged(Option<NaiveDate>),
    /// A tap on this day was vetoed by the `should_select` predicate.
    SelectionRejected(NaiveDate),
}

impl DateListAction {
    /// Writes a requested selection into `selected`. Returns `true` if anything needs redrawing.
    pub fn apply(self, selected: &mut Option<NaiveDate>) -> bool {
        match self {
            Self::SelectionChanged(next) => {
                *selected = next;
                true
            }
            Self::Redraw => true,
            Self::None | Self::SelectionRejected(_) => false,
        }
    }
}

/// Tapping `date` selects it, unless it is already selected, in which case the selection clears.
pub fn toggle(selected: Option<NaiveDate>, date: NaiveDate) -> Option<NaiveDate> {
    if selected == Some(date) {
        None
    } else {
        Some(date)
    }
}

/// The default row content: the date written out, e.g. "January 3, 2024".
pub fn date_text(date: NaiveDate) -> Line<'static> {
    Line::from(date.format("%B %-d, %Y").to_string())
}

/// A scrollable, virtualized list of the days in a [`DateRange`], newest first.
///
/// Each row shows whatever the content callback builds from the day, the provider's data for it,
/// and whether it is the selected day. Selection is single and optional: a tap selects a day, a
/// second tap on the same day clears it. The selected day is owned by the caller and passed into
/// [`DateList::render`] and [`DateList::handle_event`].
pub struct DateList<P: DateDataProvider = EmptyDataProvider> {
    range: DateRange,
    provider: P,
    options: DateListOptions,
    list: VirtualListView,
    content: ContentFn<P::Output>,
    should_select: ShouldSelectFn<P::Output>,
}

impl<P: DateDataProvider + std::fmt::Debug> std::fmt::Debug for DateList<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateList")
            .field("range", &self.range)
            .field("provider", &self.provider)
            .field("options", &self.options)
            .field("list", &self.list)
            .finish_non_exhaustive()
    }
}

impl DateList<EmptyDataProvider> {
    /// A plain list of dates, each row showing [`date_text`].
    pub fn new(range: DateRange) -> Self {
        Self::with_provider(range, EmptyDataProvider, |date, _, _| date_text(date))
    }

    /// # Errors
    /// Returns [`DateRangeError::EndBeforeStart`] if `end < start`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        Ok(Self::new(DateRange::new(start, end)?))
    }
}

impl<P: DateDataProvider> DateList<P> {
    pub fn with_provider(
        range: DateRange,
        provider: P,
        content: impl Fn(NaiveDate, &P::Output, bool) -> Line<'static> + 'static,
    ) -> Self {
        let options = DateListOptions::default();
        Self {
            range,
            provider,
            list: VirtualListView::with_options(options.list_options()),
            options,
            content: Box::new(content),
            should_select: Box::new(|_, _| true),
        }
    }

    pub fn with_options(mut self, options: DateListOptions) -> Self {
        self.set_options(options);
        self
    }

    pub fn with_should_select(
        mut self,
        should_select: impl Fn(NaiveDate, &P::Output) -> bool + 'static,
    ) -> Self {
        self.should_select = Box::new(should_select);
        self
    }

    pub fn options(&self) -> &DateListOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: DateListOptions) {
        self.list.set_options(options.list_options());
        self.options = options;
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    /// Swaps in new bounds. The cursor stays on the same day when the new range still has it.
    pub fn set_range(&mut self, range: DateRange) {
        let cursor_date = self.cursor_date();
        self.range = range;
        let row = cursor_date.and_then(|d| range.row_of(d));
        self.list.set_cursor(row, range.len());
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn set_provider(&mut self, provider: P) {
        self.provider = provider;
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.list.viewport
    }

    /// The day under the keyboard cursor.
    pub fn cursor_date(&self) -> Option<NaiveDate> {
        self.list
            .cursor()
            .and_then(|row| self.range.get_reversed(row))
    }

    /// Moves the cursor onto `date` and scrolls it into view. Returns `false` if `date` is outside
    /// the range.
    pub fn scroll_to_date(&mut self, date: NaiveDate) -> bool {
        let Some(row) = self.range.row_of(date) else {
            return false;
        };
        self.list.set_cursor(Some(row), self.range.len());
        true
    }

    /// A tap on `date`: asks `should_select`, then toggles.
    pub fn tap(&self, date: NaiveDate, selected: Option<NaiveDate>) -> DateListAction {
        if !self.range.contains(date) {
            return DateListAction::None;
        }
        let data = self.provider.data(date);
        if !(self.should_select)(date, &data) {
            tracing::debug!(%date, "selection vetoed");
            return DateListAction::SelectionRejected(date);
        }
        let next = toggle(selected, date);
        tracing::debug!(%date, ?next, "selection requested");
        DateListAction::SelectionChanged(next)
    }

    pub fn handle_event(
        &mut self,
        event: InputEvent,
        selected: Option<NaiveDate>,
    ) -> DateListAction {
        if let InputEvent::Key(key) = &event {
            if self.options.bindings.is_clear(key) {
                return match selected {
                    Some(_) => DateListAction::SelectionChanged(None),
                    None => DateListAction::None,
                };
            }
            if self.options.bindings.is_toggle(key) {
                return match self.cursor_date() {
                    Some(date) => self.tap(date, selected),
                    None => DateListAction::None,
                };
            }
        }

        match self.list.handle_event(event, self.range.len()) {
            VirtualListAction::None => DateListAction::None,
            VirtualListAction::Redraw => DateListAction::Redraw,
            VirtualListAction::Tapped(row) => match self.range.get_reversed(row) {
                Some(date) => self.tap(date, selected),
                None => DateListAction::None,
            },
        }
    }

    pub fn render(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        selected: Option<NaiveDate>,
    ) {
        let range = self.range;
        let provider = &self.provider;
        let content = &self.content;
        let alignment = self.options.alignment;
        let selected_style = self.options.selected_style.unwrap_or_else(|| theme.selected());

        self.list
            .render(area, buf, theme, range.len(), |row_area, ctx, buf| {
                let Some(date) = range.get_reversed(ctx.index) else {
                    return;
                };
                let is_selected = selected == Some(date);
                let style = if is_selected {
                    ctx.base_style.patch(selected_style)
                } else {
                    ctx.base_style
                };
                if is_selected {
                    buf.set_style(row_area, style);
                }

                let middle = ctx.item.size.saturating_sub(1) / 2;
                let Some(dy) = middle.checked_sub(ctx.clip_top) else {
                    return;
                };
                if dy >= row_area.height as u32 {
                    return;
                }

                let data = provider.data(date);
                let line = content(date, &data, is_selected);
                let line_w = render::spans_width(&line.spans).min(row_area.width as usize) as u16;
                let dx = alignment.offset(row_area.width, line_w);
                render::render_spans_clipped(
                    row_area.x + dx,
                    row_area.y + dy as u16,
                    row_area.width - dx,
                    buf,
                    &line.spans,
                    style.patch(line.style),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::EveryFourthDayCount;
    use ratatui_date_list_core::input::MouseButton;
    use ratatui_date_list_core::input::MouseEvent;
    use ratatui_date_list_core::input::MouseEventKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january() -> DateRange {
        DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap()
    }

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code))
    }

    #[test]
    fn toggle_law() {
        let d = date(2024, 1, 5);
        assert_eq!(toggle(None, d), Some(d));
        assert_eq!(toggle(toggle(None, d), d), None);
    }

    #[test]
    fn tapping_another_day_replaces_selection() {
        let list = DateList::new(january());
        let a = date(2024, 1, 5);
        let b = date(2024, 1, 9);
        assert_eq!(list.tap(b, Some(a)), DateListAction::SelectionChanged(Some(b)));
    }

    #[test]
    fn veto_leaves_selection_alone() {
        let list = DateList::with_provider(january(), EveryFourthDayCount::new(), |d, n, _| {
            Line::from(format!("{d} {n}"))
        })
        .with_should_select(|_, n| *n == 0);

        let mut selected = Some(date(2024, 1, 8));
        let action = list.tap(date(2024, 1, 9), selected);
        assert_eq!(action, DateListAction::SelectionRejected(date(2024, 1, 9)));
        assert!(!action.apply(&mut selected));
        assert_eq!(selected, Some(date(2024, 1, 8)));

        // A vetoed day can't be deselected either.
        let mut selected = Some(date(2024, 1, 9));
        list.tap(date(2024, 1, 9), selected).apply(&mut selected);
        assert_eq!(selected, Some(date(2024, 1, 9)));
    }

    #[test]
    fn taps_outside_the_range_are_ignored() {
        let list = DateList::new(january());
        assert_eq!(list.tap(date(2024, 2, 1), None), DateListAction::None);
    }

    #[test]
    fn apply_stores_requested_selection() {
        let mut selected = None;
        assert!(DateListAction::SelectionChanged(Some(date(2024, 1, 2))).apply(&mut selected));
        assert_eq!(selected, Some(date(2024, 1, 2)));
        assert!(DateListAction::SelectionChanged(None).apply(&mut selected));
        assert_eq!(selected, None);
    }

    #[test]
    fn enter_toggles_the_cursor_day() {
        let mut list = DateList::new(january());
        assert_eq!(list.handle_event(key(KeyCode::Down), None), DateListAction::Redraw);
        assert_eq!(list.cursor_date(), Some(date(2024, 1, 31)));

        let mut selected = None;
        list.handle_event(key(KeyCode::Enter), selected)
            .apply(&mut selected);
        assert_eq!(selected, Some(date(2024, 1, 31)));
        list.handle_event(key(KeyCode::Char(' ')), selected)
            .apply(&mut selected);
        assert_eq!(selected, None);
    }

    #[test]
    fn esc_clears_only_when_something_is_selected() {
        let mut list = DateList::new(january());
        assert_eq!(list.handle_event(key(KeyCode::Esc), None), DateListAction::None);
        assert_eq!(
            list.handle_event(key(KeyCode::Esc), Some(date(2024, 1, 3))),
            DateListAction::SelectionChanged(None)
        );
    }

    #[test]
    fn click_selects_the_row_under_the_pointer() {
        let mut list = DateList::new(january());
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        list.render(area, &mut buf, &Theme::default(), None);

        let click = InputEvent::Mouse(MouseEvent::new(
            4,
            2,
            MouseEventKind::Down(MouseButton::Left),
        ));
        assert_eq!(
            list.handle_event(click, None),
            DateListAction::SelectionChanged(Some(date(2024, 1, 29)))
        );
    }

    #[test]
    fn scroll_to_date_moves_cursor() {
        let mut list = DateList::new(january());
        assert!(list.scroll_to_date(date(2024, 1, 10)));
        assert_eq!(list.cursor_date(), Some(date(2024, 1, 10)));
        assert!(!list.scroll_to_date(date(2023, 12, 31)));
    }

    #[test]
    fn set_range_keeps_cursor_day() {
        let mut list = DateList::new(january());
        list.scroll_to_date(date(2024, 1, 10));
        list.set_range(DateRange::new(date(2024, 1, 5), date(2024, 2, 10)).unwrap());
        assert_eq!(list.cursor_date(), Some(date(2024, 1, 10)));
        list.set_range(DateRange::new(date(2024, 3, 1), date(2024, 3, 2)).unwrap());
        assert_eq!(list.cursor_date(), None);
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(HorizontalAlignment::Leading.offset(10, 4), 0);
        assert_eq!(HorizontalAlignment::Center.offset(10, 4), 3);
        assert_eq!(HorizontalAlignment::Trailing.offset(10, 4), 6);
        assert_eq!(HorizontalAlignment::Trailing.offset(3, 4), 0);
    }

    #[test]
    fn between_rejects_reversed_bounds() {
        assert!(DateList::between(date(2024, 1, 2), date(2024, 1, 1)).is_err());
    }

    #[test]
    fn default_text_is_written_out() {
        let line = date_text(date(2024, 1, 3));
        assert_eq!(line.to_string(), "January 3, 2024");
    }
}
