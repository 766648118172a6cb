use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::render;
use crate::theme::Theme;
use crate::viewport::ViewportState;
use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use virtualizer::Align;
use virtualizer::VirtualItem;
use virtualizer::Virtualizer;
use virtualizer::VirtualizerOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VirtualListAction {
    None,
    Redraw,
    /// A row was clicked with the primary button. The cursor has moved onto it.
    Tapped(usize),
}

#[derive(Clone, Debug)]
pub struct VirtualListViewOptions {
    pub show_scrollbar: bool,
    pub overscan: usize,
    pub item_size: u32,
    pub gap: u32,
    pub padding_top: u32,
    pub padding_bottom: u32,
    pub wheel_step: u32,
    pub style: Style,
    pub scrollbar_style: Style,
    pub cursor_style: Style,
}

impl Default for VirtualListViewOptions {
    fn default() -> Self {
        Self {
            show_scrollbar: true,
            overscan: 2,
            item_size: 1,
            gap: 0,
            padding_top: 0,
            padding_bottom: 0,
            wheel_step: 3,
            style: Style::default(),
            scrollbar_style: Style::default(),
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

/// What the row callback of [`VirtualListView::render`] gets to know about a row.
#[derive(Clone, Debug)]
pub struct VirtualListItemContext {
    pub index: usize,
    pub item: VirtualItem,
    /// Offset into the item due to top clipping (in scroll-axis units).
    pub clip_top: u32,
    pub is_cursor: bool,
    /// Style already painted under the row: the list's base style, or the cursor style.
    pub base_style: Style,
}

/// A vertically scrolling list that only materializes the rows in view.
///
/// The list doesn't own its items. Callers pass `count` on every call and draw each visible row
/// themselves from the index they are handed. Row positions from the last render are kept so mouse
/// clicks can be mapped back to an index.
pub struct VirtualListView {
    pub viewport: ViewportState,
    options: VirtualListViewOptions,
    virtualizer: Virtualizer,
    cursor: Option<usize>,
    hit_rows: Vec<(usize, Rect)>,
}

impl std::fmt::Debug for VirtualListView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualListView")
            .field("viewport", &self.viewport)
            .field("options", &self.options)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl Default for VirtualListView {
    fn default() -> Self {
        Self::with_options(VirtualListViewOptions::default())
    }
}

impl VirtualListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: VirtualListViewOptions) -> Self {
        let virtualizer = Self::make_virtualizer(0, &options);
        Self {
            viewport: ViewportState::default(),
            options,
            virtualizer,
            cursor: None,
            hit_rows: Vec::new(),
        }
    }

    pub fn options(&self) -> &VirtualListViewOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: VirtualListViewOptions) {
        let size_changed = options.item_size != self.options.item_size;
        self.options = options;
        if size_changed {
            self.virtualizer = Self::make_virtualizer(self.virtualizer.count(), &self.options);
        }
        self.apply_layout_options();
        self.viewport.clamp();
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Option<usize>, count: usize) {
        self.cursor = clamp_cursor(cursor, count);
        self.ensure_cursor_visible(count);
    }

    pub fn ensure_cursor_visible(&mut self, count: usize) {
        if count == 0 {
            self.cursor = None;
            self.viewport.set_content(0, 0);
            self.viewport.y = 0;
            return;
        }
        self.sync_virtualizer(count);
        if let Some(cursor) = self.cursor {
            self.virtualizer.scroll_to_index(cursor, Align::Auto);
            self.viewport.y = self.virtualizer.scroll_offset().min(u32::MAX as u64) as u32;
        }
        self.viewport.clamp();
    }

    /// Maps a terminal position to the row drawn there by the last [`Self::render`].
    pub fn index_at(&self, x: u16, y: u16) -> Option<usize> {
        let pos = Position::new(x, y);
        self.hit_rows
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(idx, _)| *idx)
    }

    pub fn handle_event(&mut self, event: InputEvent, count: usize) -> VirtualListAction {
        match event {
            InputEvent::Key(key) => self.handle_key(key, count),
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse, count),
        }
    }

    pub fn render<F>(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        count: usize,
        mut render_item: F,
    ) where
        F: FnMut(Rect, VirtualListItemContext, &mut Buffer),
    {
        self.hit_rows.clear();
        if area.width == 0 || area.height == 0 {
            return;
        }

        let (content_area, scrollbar_x) = if self.options.show_scrollbar && area.width >= 2 {
            (
                Rect::new(area.x, area.y, area.width - 1, area.height),
                Some(area.x + area.width - 1),
            )
        } else {
            (area, None)
        };

        self.viewport
            .set_viewport(content_area.width, content_area.height);
        self.cursor = clamp_cursor(self.cursor, count);
        self.sync_virtualizer(count);

        let base_style = if self.options.style == Style::default() {
            theme.text_primary
        } else {
            self.options.style
        };
        buf.set_style(content_area, base_style);
        let cursor_style = base_style.patch(self.options.cursor_style);

        let scroll = self.virtualizer.scroll_offset();
        for item in self.virtualizer.get_virtual_items() {
            let rel_start = item.start as i64 - scroll as i64;
            let clip_top = (-rel_start).max(0) as u32;
            let visible_start = rel_start.max(0).min(u16::MAX as i64) as u16;
            let remaining_h = content_area.height.saturating_sub(visible_start);
            if remaining_h == 0 {
                continue;
            }

            let visible_h_u32 = item.size.saturating_sub(clip_top);
            if visible_h_u32 == 0 {
                continue;
            }
            let visible_h = visible_h_u32.min(remaining_h as u32) as u16;

            let item_area = Rect::new(
                content_area.x,
                content_area.y + visible_start,
                content_area.width,
                visible_h,
            );

            let idx = item.index;
            let is_cursor = self.cursor == Some(idx);
            let style = if is_cursor { cursor_style } else { base_style };
            buf.set_style(item_area, style);
            self.hit_rows.push((idx, item_area));

            let ctx = VirtualListItemContext {
                index: idx,
                item,
                clip_top,
                is_cursor,
                base_style: style,
            };
            render_item(item_area, ctx, buf);
        }

        if let (Some(first), Some(last)) = (self.hit_rows.first(), self.hit_rows.last()) {
            tracing::trace!(first = first.0, last = last.0, count, "virtual list rows drawn");
        }

        if let Some(sb_x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(sb_x, area.y, 1, area.height),
                buf,
                &self.viewport,
                self.options.scrollbar_style,
            );
        }
    }

    fn handle_key(&mut self, key: KeyEvent, count: usize) -> VirtualListAction {
        if count == 0 {
            self.cursor = None;
            self.viewport.y = 0;
            self.viewport.clamp();
            return VirtualListAction::None;
        }

        self.sync_virtualizer(count);

        if key.modifiers.ctrl && !key.modifiers.alt {
            return match key.code {
                KeyCode::Char('d') => self.scroll_pages(1, count),
                KeyCode::Char('u') => self.scroll_pages(-1, count),
                _ => VirtualListAction::None,
            };
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor_by(1, count),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor_by(-1, count),
            KeyCode::PageDown => self.scroll_pages(1, count),
            KeyCode::PageUp => self.scroll_pages(-1, count),
            KeyCode::Home | KeyCode::Char('g') => self.jump_to(0, count),
            KeyCode::End | KeyCode::Char('G') => self.jump_to(count - 1, count),
            _ => VirtualListAction::None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, count: usize) -> VirtualListAction {
        if count == 0 {
            return VirtualListAction::None;
        }
        self.sync_virtualizer(count);
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(self.options.wheel_step as i32, count),
            MouseEventKind::ScrollUp => self.scroll_by(-(self.options.wheel_step as i32), count),
            _ if mouse.is_tap() => match self.index_at(mouse.x, mouse.y) {
                Some(idx) if idx < count => {
                    self.cursor = Some(idx);
                    VirtualListAction::Tapped(idx)
                }
                _ => VirtualListAction::None,
            },
            _ => VirtualListAction::None,
        }
    }

    fn jump_to(&mut self, idx: usize, count: usize) -> VirtualListAction {
        if self.cursor == Some(idx) {
            return VirtualListAction::None;
        }
        self.cursor = Some(idx);
        self.ensure_cursor_visible(count);
        VirtualListAction::Redraw
    }

    fn move_cursor_by(&mut self, delta: i32, count: usize) -> VirtualListAction {
        let next = match self.cursor {
            None => 0,
            Some(cur) => (cur as i64 + delta as i64).clamp(0, count as i64 - 1) as usize,
        };
        self.jump_to(next, count)
    }

    fn scroll_pages(&mut self, pages: i32, count: usize) -> VirtualListAction {
        let before = self.viewport.y;
        if pages > 0 {
            self.viewport.page_down();
        } else {
            self.viewport.page_up();
        }
        self.commit_scroll(before, count)
    }

    fn scroll_by(&mut self, delta: i32, count: usize) -> VirtualListAction {
        let before = self.viewport.y;
        self.viewport.scroll_y_by(delta);
        self.commit_scroll(before, count)
    }

    // Keyboard paging drags the cursor along so it never scrolls out of view.
    fn commit_scroll(&mut self, before: u32, count: usize) -> VirtualListAction {
        self.virtualizer.set_scroll_offset(self.viewport.y as u64);
        self.viewport.y = self.virtualizer.scroll_offset().min(u32::MAX as u64) as u32;
        if self.viewport.y == before {
            return VirtualListAction::None;
        }
        self.set_cursor_from_scroll(count);
        VirtualListAction::Redraw
    }

    fn set_cursor_from_scroll(&mut self, count: usize) {
        self.sync_virtualizer(count);
        if let Some(i) = self
            .virtualizer
            .index_at_offset(self.virtualizer.scroll_offset())
        {
            self.cursor = Some(i);
        }
    }

    fn apply_layout_options(&mut self) {
        self.virtualizer.set_overscan(self.options.overscan);
        self.virtualizer
            .set_padding(self.options.padding_top, self.options.padding_bottom);
        self.virtualizer.set_gap(self.options.gap);
    }

    fn sync_virtualizer(&mut self, count: usize) {
        self.virtualizer.set_count(count);
        self.virtualizer
            .set_viewport_size(self.viewport.viewport_h as u32);
        self.apply_layout_options();
        self.virtualizer.set_scroll_offset(self.viewport.y as u64);
        self.viewport.y = self.virtualizer.scroll_offset().min(u32::MAX as u64) as u32;
        self.viewport
            .set_content(self.viewport.viewport_w as u32, self.total_size_u32());
    }

    fn total_size_u32(&self) -> u32 {
        self.virtualizer.get_total_size().min(u32::MAX as u64) as u32
    }

    fn make_virtualizer(count: usize, options: &VirtualListViewOptions) -> Virtualizer {
        let size = options.item_size.max(1);
        let mut opts = VirtualizerOptions::new(count, move |_| size);
        opts.overscan = options.overscan;
        Virtualizer::new(opts)
    }
}

fn clamp_cursor(cursor: Option<usize>, count: usize) -> Option<usize> {
    match cursor {
        None => None,
        Some(_) if count == 0 => None,
        Some(i) => Some(i.min(count - 1)),
    }
}
