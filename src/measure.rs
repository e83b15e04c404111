use unicode_width::UnicodeWidthStr;

/// Column layout for plain-text tables.
pub struct TextMetrics {
    pub column_gap: usize,
    pub min_column_width: usize,
    pub rule: char,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            column_gap: 2,
            min_column_width: 4,
            rule: '-',
        }
    }
}

impl TextMetrics {
    /// Display width in terminal columns.
    pub fn text_width(&self, text: &str) -> usize {
        UnicodeWidthStr::width(text)
    }

    pub fn column_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
        headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                rows.iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| self.text_width(cell))
                    .fold(self.text_width(header), usize::max)
                    .max(self.min_column_width)
            })
            .collect()
    }

    /// Render `rows` under `headers`, left-aligned, with a rule below the
    /// header line. Trailing spaces are trimmed.
    pub fn render_table(&self, headers: &[&str], rows: &[Vec<String>]) -> String {
        let widths = self.column_widths(headers, rows);
        let mut output = String::new();

        let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        self.push_row(&mut output, &widths, &header_cells);

        let total = widths.iter().sum::<usize>() + self.column_gap * widths.len().saturating_sub(1);
        output.extend(std::iter::repeat_n(self.rule, total));
        output.push('\n');

        for row in rows {
            self.push_row(&mut output, &widths, row);
        }
        output
    }

    fn push_row(&self, output: &mut String, widths: &[usize], cells: &[String]) {
        let mut line = String::new();
        for (i, width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            if i > 0 {
                line.extend(std::iter::repeat_n(' ', self.column_gap));
            }
            line.push_str(cell);
            line.extend(std::iter::repeat_n(' ', width.saturating_sub(self.text_width(cell))));
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        let m = TextMetrics::default();
        assert_eq!(m.text_width("User"), 4);
    }

    #[test]
    fn test_unicode_width() {
        let m = TextMetrics::default();
        // 全角文字は幅2
        assert_eq!(m.text_width("ユーザー"), 8);
    }

    #[test]
    fn test_mixed_width() {
        let m = TextMetrics::default();
        // "User" (4) + "テスト" (6) = 10
        assert_eq!(m.text_width("Userテスト"), 10);
    }

    #[test]
    fn test_column_widths() {
        let m = TextMetrics::default();
        let rows = vec![
            vec!["CUSTOMER".to_string(), "3".to_string()],
            vec!["顧客".to_string(), "12".to_string()],
        ];
        assert_eq!(m.column_widths(&["Entity", "N"], &rows), vec![8, 4]);
    }

    #[test]
    fn test_render_table_aligns_wide_text() {
        let m = TextMetrics::default();
        let rows = vec![
            vec!["顧客".to_string(), "1".to_string()],
            vec!["ORDER".to_string(), "20".to_string()],
        ];
        let table = m.render_table(&["Entity", "Attrs"], &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Entity  Attrs");
        assert_eq!(lines[1], "-------------");
        assert_eq!(lines[2], "顧客    1");
        assert_eq!(lines[3], "ORDER   20");
    }

    #[test]
    fn test_render_empty_table() {
        let m = TextMetrics::default();
        let table = m.render_table(&["Entity"], &[]);
        assert_eq!(table, "Entity\n------\n");
    }
}
