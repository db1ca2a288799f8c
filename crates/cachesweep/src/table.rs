/// Box-drawn table sized to its contents.
///
/// Each column is as wide as its widest cell, clamped to `max_width`.
pub struct TableFormatter {
    headers: Vec<&'static str>,
    widths: Vec<usize>,
    max_width: usize,
    rows: Vec<Vec<String>>,
}

impl TableFormatter {
    pub fn new(headers: &[&'static str], max_width: usize) -> Self {
        Self {
            headers: headers.to_vec(),
            widths: headers
                .iter()
                .map(|h| h.chars().count().min(max_width))
                .collect(),
            max_width,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (width, cell) in self.widths.iter_mut().zip(&row) {
            *width = (*width).max(cell.chars().count().min(self.max_width));
        }
        self.rows.push(row);
    }

    pub fn print_table(&self) {
        for line in self.render() {
            println!("{}", line);
        }
    }

    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.rows.len() + 4);
        lines.push(self.border('┌', '┬', '┐'));
        lines.push(self.row(self.headers.iter().map(|h| h.to_string())));
        lines.push(self.border('├', '┼', '┤'));
        for row in &self.rows {
            lines.push(self.row(row.iter().cloned()));
        }
        lines.push(self.border('└', '┴', '┘'));
        lines
    }

    fn border(&self, left: char, middle: char, right: char) -> String {
        let segments: Vec<String> = self
            .widths
            .iter()
            .map(|width| "─".repeat(width + 2))
            .collect();
        format!("{left}{}{right}", segments.join(&middle.to_string()))
    }

    fn row(&self, cells: impl Iterator<Item = String>) -> String {
        let cells: Vec<String> = cells
            .chain(std::iter::repeat(String::new()))
            .zip(&self.widths)
            .map(|(cell, width)| format!(" {} ", truncate(&cell, *width)))
            .collect();
        format!("│{}│", cells.join("│"))
    }
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Uses character count (not byte count) so multi-byte names are cut on
/// character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
