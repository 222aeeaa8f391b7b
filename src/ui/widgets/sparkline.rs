//! Bar sparkline for per-month counts

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

const BAR_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Vertical bars, one per value, with an optional label row underneath.
/// Each bar is `bar_width` cells wide and separated by one blank column.
pub struct MonthBars<'a> {
    data: &'a [u64],
    labels: Option<&'a [String]>,
    bar_width: u16,
    style: Style,
    label_style: Style,
}

impl<'a> MonthBars<'a> {
    pub fn new(data: &'a [u64]) -> Self {
        Self {
            data,
            labels: None,
            bar_width: 3,
            style: Style::default(),
            label_style: Style::default(),
        }
    }

    pub fn labels(mut self, labels: &'a [String]) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn bar_width(mut self, width: u16) -> Self {
        self.bar_width = width.max(1);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }
}

/// Height of a bar in eighths of a cell
fn scaled(value: u64, max: u64, rows: u16) -> u64 {
    let max = max.max(1);
    ((value as f64 / max as f64) * (rows as f64 * 8.0)).round() as u64
}

impl<'a> Widget for MonthBars<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.data.is_empty() {
            return;
        }

        let label_rows = u16::from(self.labels.is_some() && area.height > 1);
        let rows = area.height - label_rows;
        let max = self.data.iter().copied().max().unwrap_or(0);
        let step = self.bar_width + 1;

        for (i, &value) in self.data.iter().enumerate() {
            let x0 = area.x + i as u16 * step;
            if x0 + self.bar_width > area.x + area.width {
                break;
            }

            let mut eighths = scaled(value, max, rows);
            for row in 0..rows {
                let y = area.y + rows - 1 - row;
                let ch = match eighths {
                    0 => break,
                    1..=7 => BAR_CHARS[eighths as usize - 1],
                    _ => '█',
                };
                for dx in 0..self.bar_width {
                    buf.get_mut(x0 + dx, y).set_char(ch).set_style(self.style);
                }
                eighths = eighths.saturating_sub(8);
            }

            if label_rows == 1 {
                if let Some(label) = self.labels.and_then(|labels| labels.get(i)) {
                    let text: String = label.chars().take(self.bar_width as usize).collect();
                    buf.set_string(x0, area.y + rows, text, self.label_style);
                }
            }
        }
    }
}

/// One-line rendering of the same data, for narrow cards
pub fn sparkline_text(data: &[u64]) -> String {
    let max = data.iter().copied().max().unwrap_or(0);
    data.iter()
        .map(|&value| {
            let eighths = scaled(value, max, 1);
            if eighths == 0 {
                ' '
            } else {
                BAR_CHARS[(eighths as usize - 1).min(7)]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparkline_text() {
        assert_eq!(sparkline_text(&[0, 0, 0, 1, 2, 4]), "   ▂▄█");
        assert!(sparkline_text(&[]).is_empty());
    }

    #[test]
    fn test_bars_render_bottom_up() {
        let data = [1, 2];
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        MonthBars::new(&data).bar_width(1).render(area, &mut buf);
        // the tallest bar fills both rows
        assert_eq!(buf.get(2, 0).symbol(), "█");
        assert_eq!(buf.get(2, 1).symbol(), "█");
        // the half-height bar fills only the bottom row
        assert_eq!(buf.get(0, 0).symbol(), " ");
        assert_eq!(buf.get(0, 1).symbol(), "█");
    }

    #[test]
    fn test_labels_take_last_row() {
        let data = [3];
        let labels = vec!["03/2024".to_string()];
        let area = Rect::new(0, 0, 4, 3);
        let mut buf = Buffer::empty(area);
        MonthBars::new(&data).labels(&labels).render(area, &mut buf);
        assert_eq!(buf.get(0, 2).symbol(), "0");
        assert_eq!(buf.get(2, 2).symbol(), "/");
        assert_eq!(buf.get(0, 1).symbol(), "█");
    }
}
