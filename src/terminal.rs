use crate::models::PollInfo;
use crate::render::chart::{TextAlign, TextStyle, BAR_HEIGHT, BAR_MARGIN};
use crate::render::{ChartLayout, ListView, Surface};
use crate::sync::PollView;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use std::borrow::Cow;
use std::fmt::Write as _;
use std::io::Write;

// Columns that stand in for the full surface width
const CHART_COLUMNS: usize = 60;
// one text row per bar slot
const ROW_PIXELS: f64 = BAR_HEIGHT + BAR_MARGIN;
const FILL: char = '#';

lazy_static! {
    static ref CONTROL_CHARS: Regex = Regex::new(r"\p{Cc}").expect("control character pattern is valid");
}

// Server text never reaches the tty with control or escape characters in it
pub fn printable(text: &str) -> Cow<'_, str> {
    CONTROL_CHARS.replace_all(text, "?")
}

// Character grid standing in for the chart canvas
pub struct TextSurface {
    width: f64,
    height: f64,
    cells: Vec<Vec<char>>,
}

impl TextSurface {
    pub fn new(width: f64, height: f64) -> Self {
        let rows = ((height / ROW_PIXELS).ceil() as usize).max(1);
        Self {
            width,
            height,
            cells: vec![vec![' '; CHART_COLUMNS]; rows],
        }
    }

    fn cell_width(&self) -> f64 {
        self.width / CHART_COLUMNS as f64
    }

    fn row_at(&self, y: f64) -> Option<usize> {
        let row = (y / ROW_PIXELS).floor();
        (row >= 0.0 && (row as usize) < self.cells.len()).then_some(row as usize)
    }

    pub fn render(&self) -> String {
        let mut text = String::new();
        for row in &self.cells {
            let line: String = row.iter().collect();
            text.push_str(line.trim_end());
            text.push('\n');
        }
        text
    }
}

impl Surface for TextSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(' ');
        }
    }

    // A cell is filled when its centre falls inside the rectangle
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, _color: &str) {
        let cell_width = self.cell_width();
        for (r, row) in self.cells.iter_mut().enumerate() {
            let centre_y = (r as f64 + 0.5) * ROW_PIXELS;
            if centre_y < y || centre_y >= y + height {
                continue;
            }
            for (c, cell) in row.iter_mut().enumerate() {
                let centre_x = (c as f64 + 0.5) * cell_width;
                if centre_x >= x && centre_x < x + width {
                    *cell = FILL;
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
        let Some(row) = self.row_at(y) else {
            return;
        };
        let chars: Vec<char> = printable(text).chars().collect();
        let anchor = x / self.cell_width();
        let start = match style.align {
            TextAlign::Left => anchor.floor() as i64,
            TextAlign::Center => anchor.round() as i64 - (chars.len() / 2) as i64,
            TextAlign::Right => anchor.round() as i64 - chars.len() as i64,
        };

        for (offset, ch) in chars.into_iter().enumerate() {
            let col = start + offset as i64;
            if col >= 0 && (col as usize) < CHART_COLUMNS {
                self.cells[row][col as usize] = ch;
            }
        }
    }
}

// Plain-text poll page written to any `Write` sink, usually stdout.
pub struct TerminalView<W: Write> {
    out: W,
    surface: TextSurface,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, chart_width: f64, chart_height: f64) -> Self {
        Self {
            out,
            surface: TextSurface::new(chart_width, chart_height),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

pub fn format_list(list: &ListView) -> String {
    let mut text = String::new();
    match list {
        ListView::Empty => text.push_str("No items yet. Add one with `add <text>`.\n"),
        ListView::Items(rows) => {
            for row in rows {
                let marker = if row.voted { "*" } else { " " };
                let _ = writeln!(
                    text,
                    "{} [{}] {} ({}) -- {}",
                    marker,
                    printable(&row.id),
                    printable(&row.text),
                    row.votes_label(),
                    row.button_label()
                );
            }
        }
    }
    text
}

impl<W: Write> PollView for TerminalView<W> {
    fn render_header(&mut self, poll: &PollInfo) {
        let status = if poll.is_active { "" } else { " (closed)" };
        let text = format!(
            "== {}{} ==\n{}\n",
            printable(&poll.title),
            status,
            printable(&poll.description)
        );
        self.emit(&text);
    }

    fn render_items(&mut self, list: &ListView) {
        self.emit(&format_list(list));
    }

    fn render_total(&mut self, total_votes: u64) {
        self.emit(&format!("Total votes: {}\n", total_votes));
    }

    fn render_chart(&mut self, chart: &ChartLayout) {
        chart.draw(&mut self.surface);
        let text = self.surface.render();
        self.emit(&text);
    }

    fn show_error(&mut self, message: &str) {
        self.emit(&format!("! {}\n", printable(message)));
    }

    fn clear_item_input(&mut self) {
        debug!("Item input accepted");
    }

    fn chart_size(&self) -> (f64, f64) {
        (self.surface.width(), self.surface.height())
    }
}
