//! Table rendering utilities for CLI outputs.

use super::formatting::{pad_left, pad_right};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

pub struct Column {
    pub header: String,
    pub align: Align,
}

impl Column {
    pub fn left(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Left,
        }
    }

    pub fn right(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Right,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Column widths by display width, so wide or accented names line up.
    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|cell| cell.width())
                    .chain(std::iter::once(col.header.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self, separator: &str) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let cell = |text: &str, i: usize| match self.columns[i].align {
            Align::Left => pad_right(text, widths[i]),
            Align::Right => pad_left(text, widths[i]),
        };

        // Header
        let header: Vec<String> = (0..self.columns.len())
            .map(|i| cell(&self.columns[i].header, i))
            .collect();
        out.push_str(header.join("  ").trim_end());
        out.push('\n');

        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&separator.repeat(total));
        out.push('\n');

        // Rows
        for row in &self.rows {
            let line: Vec<String> = (0..self.columns.len())
                .map(|i| cell(row.get(i).map(String::as_str).unwrap_or(""), i))
                .collect();
            out.push_str(line.join("  ").trim_end());
            out.push('\n');
        }

        out
    }
}
