//! Plain-text table rendering and number formatting for command output.

use std::io::{self, Write};

/// One column of a [`Table`].
#[derive(Clone, Debug, Default)]
pub struct Column {
    pub header: String,
    pub align_right: bool,
    /// Minimum width in characters; 0 means none.
    pub min_width: usize,
    /// Maximum width in characters; longer cells are truncated. 0 means none.
    pub max_width: usize,
}

impl Column {
    #[must_use]
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn right(mut self) -> Self {
        self.align_right = true;
        self
    }

    #[must_use]
    pub fn with_widths(mut self, min_width: usize, max_width: usize) -> Self {
        self.min_width = min_width;
        self.max_width = max_width;
        self
    }

    fn clamp(&self, width: usize) -> usize {
        let width = width.max(self.min_width);
        if self.max_width > 0 {
            width.min(self.max_width)
        } else {
            width
        }
    }
}

/// An aligned text table: header line first, then rows.
///
/// Widths count characters. Rows longer than the column list keep their
/// extra cells unaligned at the end; shorter rows are padded with blanks.
#[derive(Clone, Debug)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    separator: String,
}

impl Table {
    #[must_use]
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            separator: "   ".to_string(),
        }
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let longest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(col.header.chars().count()))
                    .max()
                    .unwrap_or(0);
                col.clamp(longest)
            })
            .collect()
    }

    fn write_line<W: Write + ?Sized>(
        &self,
        out: &mut W,
        widths: &[usize],
        cells: &[String],
    ) -> io::Result<()> {
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                line.push_str(&self.separator);
            }
            match (self.columns.get(i), widths.get(i)) {
                (Some(col), Some(&width)) => pad(&mut line, cell, width, col.align_right),
                _ => line.push_str(cell),
            }
        }
        for (i, &width) in widths.iter().enumerate().skip(cells.len()) {
            if i > 0 {
                line.push_str(&self.separator);
            }
            line.push_str(&" ".repeat(width));
        }
        writeln!(out, "{}", line.trim_end())
    }

    /// Write the header line and every row.
    ///
    /// # Errors
    /// Any error from `out`.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        self.write_body(out, true)
    }

    /// Write only the rows, without the header line.
    ///
    /// # Errors
    /// Any error from `out`.
    pub fn write_rows_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        self.write_body(out, false)
    }

    fn write_body<W: Write + ?Sized>(&self, out: &mut W, header: bool) -> io::Result<()> {
        let widths = self.widths();
        if header {
            let names: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
            self.write_line(out, &widths, &names)?;
        }
        for row in &self.rows {
            self.write_line(out, &widths, row)?;
        }
        Ok(())
    }

    /// The whole table, header included, as a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn pad(line: &mut String, cell: &str, width: usize, right: bool) {
    let len = cell.chars().count();
    if len > width {
        line.extend(cell.chars().take(width));
        return;
    }
    let fill = " ".repeat(width - len);
    if right {
        line.push_str(&fill);
        line.push_str(cell);
    } else {
        line.push_str(cell);
        line.push_str(&fill);
    }
}

/// Format `n` with `,` between groups of three digits.
#[must_use]
pub fn comma(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_groups_digits() {
        assert_eq!(comma(0), "0");
        assert_eq!(comma(999), "999");
        assert_eq!(comma(1000), "1,000");
        assert_eq!(comma(1_234_567), "1,234,567");
    }

    #[test]
    fn pads_and_truncates() {
        let mut s = String::new();
        pad(&mut s, "ab", 4, true);
        assert_eq!(s, "  ab");
        s.clear();
        pad(&mut s, "abcdef", 3, false);
        assert_eq!(s, "abc");
    }
}
