/// A plain-text table for terminal output
///
/// Cells longer than the column limit are shortened in the middle so both
/// ends of an address stay visible (`0x12ab…89ef`).
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
    max_col_width: usize,
}

impl Table {
    const DEFAULT_MAX_COL_WIDTH: usize = 24;

    /// Create a new table with the given headers
    pub fn new(headers: &[&str]) -> Self {
        Table {
            col_widths: headers.iter().map(|h| h.chars().count()).collect(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            max_col_width: Self::DEFAULT_MAX_COL_WIDTH,
        }
    }

    pub fn with_max_col_width(mut self, width: usize) -> Self {
        self.max_col_width = width.max(5);
        self
    }

    /// Add a row; extra cells beyond the header count are dropped
    pub fn add_row(&mut self, row: Vec<String>) {
        let row: Vec<String> = row
            .into_iter()
            .take(self.headers.len())
            .map(|cell| shorten(&cell, self.max_col_width))
            .collect();

        for (i, cell) in row.iter().enumerate() {
            self.col_widths[i] = self.col_widths[i].max(cell.chars().count());
        }

        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.render_row(&self.headers));
        output.push('\n');
        output.push_str(&self.render_separator());

        for row in &self.rows {
            output.push('\n');
            output.push_str(&self.render_row(row));
        }

        output
    }

    fn render_row(&self, row: &[String]) -> String {
        row.iter()
            .zip(&self.col_widths)
            .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    }

    fn render_separator(&self) -> String {
        self.col_widths
            .iter()
            .map(|&width| "-".repeat(width))
            .collect::<Vec<_>>()
            .join("-+-")
    }
}

fn shorten(cell: &str, max: usize) -> String {
    let len = cell.chars().count();
    if len <= max {
        return cell.to_string();
    }

    let keep = max - 1;
    let head = keep / 2 + keep % 2;
    let tail = keep / 2;
    let start: String = cell.chars().take(head).collect();
    let end: String = cell.chars().skip(len - tail).collect();
    format!("{}…{}", start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(&["From", "To", "Amount"]);
        table.add_row(vec!["0xA".into(), "0xB".into(), "1.0".into()]);
        table.add_row(vec!["0xC".into(), "0xD".into(), "0.5".into()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("From"));
        assert!(lines[1].contains("-+-"));
        assert!(lines[2].contains("0xA"));
        assert!(lines[3].contains("0.5"));
    }

    #[test]
    fn test_long_cells_are_shortened_in_the_middle() {
        let mut table = Table::new(&["Address"]).with_max_col_width(11);
        table.add_row(vec!["0x1234567890abcdef".into()]);

        let rendered = table.render();
        assert!(rendered.contains("0x123…bcdef"));
    }
}
