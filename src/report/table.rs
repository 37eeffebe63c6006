use console::measure_text_width;

/// Box-drawn grid with a header row and multi-line cells.
///
/// Cells may carry ANSI styling; widths are measured on visible text.
pub struct Grid {
    headers: Vec<String>,
    rows: Vec<Vec<Vec<String>>>,
}

impl Grid {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row; each cell is a list of lines
    pub fn add_row(&mut self, cells: Vec<Vec<String>>) {
        self.rows.push(cells);
    }

    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut out = Vec::new();

        out.push(border(&widths, '╒', '═', '╤', '╕'));
        let header: Vec<Vec<String>> = self.headers.iter().map(|h| vec![h.clone()]).collect();
        out.extend(row_lines(&widths, &header));
        out.push(border(&widths, '╞', '═', '╪', '╡'));

        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push(border(&widths, '├', '─', '┼', '┤'));
            }
            out.extend(row_lines(&widths, row));
        }

        out.push(border(&widths, '╘', '═', '╧', '╛'));
        out.join("\n")
    }

    fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .flatten()
                    .map(|line| measure_text_width(line))
                    .chain(std::iter::once(measure_text_width(header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

fn border(widths: &[usize], left: char, fill: char, join: char, right: char) -> String {
    let segments: Vec<String> = widths
        .iter()
        .map(|w| fill.to_string().repeat(w + 2))
        .collect();
    format!("{}{}{}", left, segments.join(&join.to_string()), right)
}

fn row_lines(widths: &[usize], cells: &[Vec<String>]) -> Vec<String> {
    let height = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);

    (0..height)
        .map(|i| {
            let parts: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(col, width)| {
                    let line = cells
                        .get(col)
                        .and_then(|cell| cell.get(i))
                        .map(String::as_str)
                        .unwrap_or("");
                    let pad = width.saturating_sub(measure_text_width(line));
                    format!(" {}{} ", line, " ".repeat(pad))
                })
                .collect();
            format!("│{}│", parts.join("│"))
        })
        .collect()
}
