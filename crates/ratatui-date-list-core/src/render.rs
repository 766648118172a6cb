use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;

use crate::viewport::ViewportState;

const TAB_WIDTH: usize = 4;

pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ViewportState, style: Style) {
    buf.set_style(area, style);
    if area.height == 0 {
        return;
    }
    if state.content_h <= state.viewport_h as u32 || state.content_h == 0 {
        for dy in 0..area.height {
            buf.set_stringn(area.x, area.y + dy, " ", 1, style);
        }
        return;
    }

    let track_h = area.height as f64;
    let thumb_h = ((state.viewport_h as f64 / state.content_h as f64) * track_h)
        .round()
        .clamp(1.0, track_h) as u16;

    let max_y = state.max_y().max(1) as f64;
    let thumb_top = ((state.y as f64 / max_y) * (track_h - thumb_h as f64))
        .round()
        .clamp(0.0, (track_h - thumb_h as f64).max(0.0)) as u16;

    for dy in 0..area.height {
        let ch = if dy >= thumb_top && dy < thumb_top + thumb_h {
            "█"
        } else {
            " "
        };
        buf.set_stringn(area.x, area.y + dy, ch, 1, style);
    }
}

fn char_cols(ch: char) -> usize {
    if ch == '\t' {
        TAB_WIDTH
    } else {
        UnicodeWidthChar::width(ch).unwrap_or(0)
    }
}

/// Display width of `spans` in terminal columns. Tabs count as four.
pub fn spans_width(spans: &[Span<'_>]) -> usize {
    spans
        .iter()
        .flat_map(|s| s.content.chars())
        .map(char_cols)
        .sum()
}

/// Writes `spans` starting at `(x, y)`, stopping before `max_cols` would be exceeded.
///
/// Spans without a style of their own take `fallback_style`. A wide char that would straddle the
/// limit is dropped rather than cut in half. Returns the number of columns written.
pub fn render_spans_clipped(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    spans: &[Span<'_>],
    fallback_style: Style,
) -> u16 {
    let max_cols = max_cols as usize;
    let mut out_cols = 0usize;
    let mut tmp = [0u8; 4];

    for span in spans {
        let style = if span.style == Style::default() {
            fallback_style
        } else {
            fallback_style.patch(span.style)
        };
        for ch in span.content.chars() {
            let w = char_cols(ch);
            if w == 0 {
                continue;
            }
            if out_cols + w > max_cols {
                return out_cols as u16;
            }

            let cx = x + out_cols as u16;
            if ch == '\t' {
                for dx in 0..TAB_WIDTH as u16 {
                    if let Some(cell) = buf.cell_mut((cx + dx, y)) {
                        cell.set_style(style);
                        cell.set_symbol(" ");
                    }
                }
            } else {
                if let Some(cell) = buf.cell_mut((cx, y)) {
                    cell.set_style(style);
                    cell.set_symbol(ch.encode_utf8(&mut tmp));
                }
                // Continuation cells of a wide char stay empty.
                for dx in 1..w as u16 {
                    if let Some(cell) = buf.cell_mut((cx + dx, y)) {
                        cell.set_style(style);
                        cell.set_symbol("");
                    }
                }
            }
            out_cols += w;
        }
    }
    out_cols as u16
}
