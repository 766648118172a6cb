/// Scroll position and the sizes it is clamped against.
///
/// `x`/`y` are offsets into the content in cells. Content sizes are `u32` so a list of many
/// thousands of rows doesn't overflow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub x: u32,
    pub y: u32,
    pub viewport_w: u16,
    pub viewport_h: u16,
    pub content_w: u32,
    pub content_h: u32,
}

impl ViewportState {
    pub fn set_viewport(&mut self, w: u16, h: u16) {
        self.viewport_w = w;
        self.viewport_h = h;
        self.clamp();
    }

    pub fn set_content(&mut self, w: u32, h: u32) {
        self.content_w = w;
        self.content_h = h;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.y = self.y.min(self.max_y());
        self.x = self.x.min(self.max_x());
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        let next = self.y as i64 + delta as i64;
        self.y = next.clamp(0, self.max_y() as i64) as u32;
    }

    pub fn page_down(&mut self) {
        self.scroll_y_by(self.page_step());
    }

    pub fn page_up(&mut self) {
        self.scroll_y_by(-self.page_step());
    }

    pub fn to_bottom(&mut self) {
        self.y = self.max_y();
    }

    /// How far down the visible bottom edge is, or `None` when everything fits.
    pub fn percent_y(&self) -> Option<u8> {
        if self.content_h == 0 || self.viewport_h == 0 || self.content_h <= self.viewport_h as u32 {
            return None;
        }
        let visible_bottom = self.y.saturating_add(self.viewport_h as u32) as f64;
        let pct = (visible_bottom / self.content_h as f64 * 100.0).round();
        Some(pct.clamp(0.0, 100.0) as u8)
    }

    pub fn max_y(&self) -> u32 {
        self.content_h.saturating_sub(self.viewport_h as u32)
    }

    pub fn max_x(&self) -> u32 {
        self.content_w.saturating_sub(self.viewport_w as u32)
    }

    fn page_step(&self) -> i32 {
        self.viewport_h.saturating_sub(1).max(1) as i32
    }
}
