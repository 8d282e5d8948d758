pub mod chart;
pub mod list;

pub use chart::{layout_chart, ChartContent, ChartLayout, Surface};
pub use list::{render_list, ItemRow, ListView};
