// Horizontal bar chart: layout is pure, drawing always starts from a cleared surface

use crate::models::PollSnapshot;

pub const BAR_HEIGHT: f64 = 30.0;
pub const BAR_MARGIN: f64 = 10.0;
pub const BAR_LEFT: f64 = 50.0;
pub const LABEL_INSET: f64 = 5.0;
pub const COUNT_RIGHT_PADDING: f64 = 10.0;
pub const TEXT_BASELINE_OFFSET: f64 = 5.0;
// share of the surface width filled by the leading bar
pub const MAX_BAR_FRACTION: f64 = 0.7;
pub const LABEL_MAX_CHARS: usize = 20;

pub const PALETTE: [&str; 8] = [
    "#4CAF50", "#2196F3", "#FF9800", "#F44336", "#9C27B0", "#00BCD4", "#FFEB3B", "#795548",
];

pub const PLACEHOLDER_TEXT: &str = "No votes yet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub font: &'static str,
    pub color: &'static str,
    pub align: TextAlign,
}

pub const PLACEHOLDER_STYLE: TextStyle = TextStyle {
    font: "16px Arial",
    color: "#666",
    align: TextAlign::Center,
};

const LABEL_FONT: &str = "14px Arial";
const LABEL_COLOR: &str = "#333";

// A fixed-size, canvas-like drawing target
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle);
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: &'static str,
    pub label: String,
    pub label_x: f64,
    pub count: String,
    pub count_x: f64,
    pub text_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartContent {
    Placeholder { text: &'static str, x: f64, y: f64 },
    Bars(Vec<BarLayout>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub content: ChartContent,
}

impl ChartLayout {
    pub fn bars(&self) -> &[BarLayout] {
        match &self.content {
            ChartContent::Bars(bars) => bars,
            ChartContent::Placeholder { .. } => &[],
        }
    }

    pub fn max_bar_width(&self) -> f64 {
        self.width * MAX_BAR_FRACTION
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        match &self.content {
            ChartContent::Placeholder { text, x, y } => {
                surface.fill_text(text, *x, *y, PLACEHOLDER_STYLE);
            }
            ChartContent::Bars(bars) => {
                for bar in bars {
                    surface.fill_rect(bar.x, bar.y, bar.width, bar.height, bar.color);
                    surface.fill_text(&bar.label, bar.label_x, bar.text_y, label_style(TextAlign::Left));
                    surface.fill_text(&bar.count, bar.count_x, bar.text_y, label_style(TextAlign::Right));
                }
            }
        }
    }
}

fn label_style(align: TextAlign) -> TextStyle {
    TextStyle {
        font: LABEL_FONT,
        color: LABEL_COLOR,
        align,
    }
}

pub fn truncate_label(text: &str) -> String {
    if text.chars().count() > LABEL_MAX_CHARS {
        let head: String = text.chars().take(LABEL_MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

pub fn layout_chart(snapshot: &PollSnapshot, width: f64, height: f64) -> ChartLayout {
    if snapshot.is_empty() {
        return ChartLayout {
            width,
            height,
            content: ChartContent::Placeholder {
                text: PLACEHOLDER_TEXT,
                x: width / 2.0,
                y: height / 2.0,
            },
        };
    }

    let max_votes = snapshot.max_votes() as f64;
    let max_bar_width = width * MAX_BAR_FRACTION;
    let stride = BAR_HEIGHT + BAR_MARGIN;
    let block_height = snapshot.items.len() as f64 * stride - BAR_MARGIN;
    let start_y = (height - block_height) / 2.0;

    let bars = snapshot
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let y = start_y + index as f64 * stride;
            BarLayout {
                x: BAR_LEFT,
                y,
                width: item.votes as f64 / max_votes * max_bar_width,
                height: BAR_HEIGHT,
                color: PALETTE[index % PALETTE.len()],
                label: truncate_label(&item.text),
                label_x: BAR_LEFT + LABEL_INSET,
                count: item.votes.to_string(),
                count_x: width - COUNT_RIGHT_PADDING,
                text_y: y + BAR_HEIGHT / 2.0 + TEXT_BASELINE_OFFSET,
            }
        })
        .collect();

    ChartLayout {
        width,
        height,
        content: ChartContent::Bars(bars),
    }
}

// Lay out the snapshot for the surface's size and draw it
pub fn draw_chart<S: Surface + ?Sized>(surface: &mut S, snapshot: &PollSnapshot) -> ChartLayout {
    let layout = layout_chart(snapshot, surface.width(), surface.height());
    layout.draw(surface);
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VoteItem;

    #[derive(Debug, Clone, PartialEq)]
    enum DrawOp {
        Clear,
        Rect {
            x: f64,
            y: f64,
            width: f64,
            height: f64,
            color: String,
        },
        Text {
            text: String,
            x: f64,
            y: f64,
            style: TextStyle,
        },
    }

    // keeps the draw calls since the last clear
    #[derive(Debug, Clone)]
    struct RecordingSurface {
        width: f64,
        height: f64,
        ops: Vec<DrawOp>,
    }

    impl RecordingSurface {
        fn new(width: f64, height: f64) -> Self {
            Self {
                width,
                height,
                ops: Vec::new(),
            }
        }

        fn ops(&self) -> &[DrawOp] {
            &self.ops
        }
    }

    impl Surface for RecordingSurface {
        fn width(&self) -> f64 {
            self.width
        }

        fn height(&self) -> f64 {
            self.height
        }

        fn clear(&mut self) {
            self.ops.clear();
            self.ops.push(DrawOp::Clear);
        }

        fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
            self.ops.push(DrawOp::Rect {
                x,
                y,
                width,
                height,
                color: color.to_string(),
            });
        }

        fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
            self.ops.push(DrawOp::Text {
                text: text.to_string(),
                x,
                y,
                style,
            });
        }
    }

    fn snapshot(votes: &[(&str, &str, u64)]) -> PollSnapshot {
        let items = votes
            .iter()
            .map(|(id, text, votes)| VoteItem {
                id: id.to_string(),
                text: text.to_string(),
                votes: *votes,
            })
            .collect::<Vec<_>>();
        let total = items.iter().map(|i| i.votes).sum();
        PollSnapshot::new(items, total)
    }

    #[test]
    fn leader_fills_seventy_percent() {
        let layout = layout_chart(&snapshot(&[("a", "Cats", 3), ("b", "Dogs", 9)]), 600.0, 400.0);
        let bars = layout.bars();

        assert_eq!(bars[1].width, 420.0);
        assert!((bars[0].width - 140.0).abs() < 1e-9);
        assert!((bars[0].width / 600.0 - 0.2333).abs() < 1e-3);
    }

    #[test]
    fn zero_votes_give_zero_width_bars() {
        let layout = layout_chart(&snapshot(&[("a", "A", 0), ("b", "B", 0)]), 600.0, 400.0);
        assert_eq!(layout.bars().len(), 2);
        assert!(layout.bars().iter().all(|bar| bar.width == 0.0));
    }

    #[test]
    fn bars_are_centred_as_a_block() {
        let layout = layout_chart(&snapshot(&[("a", "A", 1), ("b", "B", 2)]), 600.0, 400.0);
        let bars = layout.bars();
        // block height = 2 * 40 - 10 = 70
        assert_eq!(bars[0].y, 165.0);
        assert_eq!(bars[1].y, 205.0);
        assert_eq!(bars[0].text_y, 185.0);
        assert_eq!(bars[0].label_x, 55.0);
        assert_eq!(bars[0].count_x, 590.0);
    }

    #[test]
    fn palette_cycles_by_position() {
        let items: Vec<(String, u64)> = (0..10).map(|i| (format!("i{}", i), i)).collect();
        let refs: Vec<(&str, &str, u64)> =
            items.iter().map(|(id, v)| (id.as_str(), id.as_str(), *v)).collect();
        let layout = layout_chart(&snapshot(&refs), 600.0, 600.0);
        let bars = layout.bars();
        assert_eq!(bars[0].color, PALETTE[0]);
        assert_eq!(bars[8].color, PALETTE[0]);
        assert_eq!(bars[9].color, PALETTE[1]);
    }

    #[test]
    fn long_labels_are_truncated() {
        assert_eq!(truncate_label("short"), "short");
        assert_eq!(truncate_label("exactly twenty chars"), "exactly twenty chars");
        assert_eq!(
            truncate_label("this label is far too long"),
            "this label is far to..."
        );
        assert_eq!(truncate_label("ééééééééééééééééééééé"), "éééééééééééééééééééé...");
    }

    #[test]
    fn empty_snapshot_draws_placeholder() {
        let mut surface = RecordingSurface::new(600.0, 400.0);
        draw_chart(&mut surface, &snapshot(&[]));
        assert_eq!(
            surface.ops(),
            &[
                DrawOp::Clear,
                DrawOp::Text {
                    text: PLACEHOLDER_TEXT.to_string(),
                    x: 300.0,
                    y: 200.0,
                    style: PLACEHOLDER_STYLE,
                }
            ]
        );
    }

    #[test]
    fn redraw_replaces_previous_frame() {
        let mut surface = RecordingSurface::new(600.0, 400.0);
        let poll = snapshot(&[("a", "Cats", 3), ("b", "Dogs", 9)]);

        draw_chart(&mut surface, &poll);
        let first = surface.ops().to_vec();
        draw_chart(&mut surface, &poll);

        assert_eq!(surface.ops(), first.as_slice());
        // clear + (rect, label, count) per bar
        assert_eq!(first.len(), 7);
        assert!(matches!(
            &first[3],
            DrawOp::Text { text, style, .. } if text == "3" && style.align == TextAlign::Right
        ));
    }
}
