// src/render/comparison.rs
//! Two-column before/after view with whole-line change highlighting

use serde::Serialize;

pub const PLACEHOLDER: &str = "(none)";

const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_DIM: &str = "\x1b[2m";
const ANSI_RESET: &str = "\x1b[0m";

const COLUMN_GAP: &str = " | ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Cell {
    /// No corresponding line on this side.
    Placeholder,
    Plain(String),
    /// Differs from the line on the other side.
    Highlighted(String),
}

impl Cell {
    pub fn text(&self) -> &str {
        match self {
            Cell::Placeholder => PLACEHOLDER,
            Cell::Plain(text) | Cell::Highlighted(text) => text,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(self, Cell::Highlighted(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub before: Cell,
    pub after: Cell,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
}

/// Empty lines count as missing, same as an index past the end.
fn line_at(lines: &[String], i: usize) -> Option<&str> {
    lines.get(i).map(String::as_str).filter(|line| !line.is_empty())
}

/// Pair `before` and `after` line by line, padding the shorter side.
///
/// Lines are compared by exact string equality: any difference, whitespace
/// included, highlights the whole `after` line.
pub fn render(before: &[String], after: &[String]) -> Comparison {
    let n = before.len().max(after.len());

    let rows = (0..n)
        .map(|i| {
            let left = match line_at(before, i) {
                Some(line) => Cell::Plain(line.to_string()),
                None => Cell::Placeholder,
            };

            let right = match line_at(after, i) {
                None => Cell::Placeholder,
                Some(line) => {
                    let original = before.get(i).map(String::as_str).unwrap_or("");
                    if original != line {
                        Cell::Highlighted(line.to_string())
                    } else {
                        Cell::Plain(line.to_string())
                    }
                }
            };

            ComparisonRow {
                before: left,
                after: right,
            }
        })
        .collect();

    Comparison { rows }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub color: bool,
    pub column_width: usize,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: true,
            column_width: 40,
        }
    }
}

impl Comparison {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn changed_lines(&self) -> usize {
        self.rows.iter().filter(|row| row.after.is_highlighted()).count()
    }

    /// Lay the rows out side by side for a terminal.
    ///
    /// Without colour, changed lines get a `~` bullet instead of `-`.
    pub fn to_text(&self, style: TextStyle) -> String {
        let width = style.column_width.max(8);
        let mut out = String::new();

        push_line(&mut out, "Before", "After", width);
        push_line(&mut out, &"-".repeat(width), &"-".repeat(width), width);

        for row in &self.rows {
            let left = cell_lines(&row.before, width);
            let right = cell_lines(&row.after, width);
            let height = left.len().max(right.len());

            for i in 0..height {
                let l = left.get(i).map(String::as_str).unwrap_or("");
                let r = right.get(i).map(String::as_str).unwrap_or("");
                let padded = pad(l, width);
                out.push_str(&paint(&row.before, &padded, style.color));
                out.push_str(COLUMN_GAP);
                out.push_str(paint(&row.after, r, style.color).trim_end());
                out.push('\n');
            }
        }

        out
    }
}

fn push_line(out: &mut String, left: &str, right: &str, width: usize) {
    out.push_str(&pad(left, width));
    out.push_str(COLUMN_GAP);
    out.push_str(right);
    out.push('\n');
}

fn cell_lines(cell: &Cell, width: usize) -> Vec<String> {
    let bullet = match cell {
        Cell::Highlighted(_) => "~ ",
        _ => "- ",
    };
    let wrapped = wrap(cell.text(), width - bullet.len());

    wrapped
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{}{}", bullet, line)
            } else {
                format!("  {}", line)
            }
        })
        .collect()
}

fn paint(cell: &Cell, text: &str, color: bool) -> String {
    if !color || text.trim().is_empty() {
        return text.to_string();
    }
    match cell {
        Cell::Placeholder => format!("{}{}{}", ANSI_DIM, text, ANSI_RESET),
        Cell::Highlighted(_) => format!("{}{}{}", ANSI_YELLOW, text, ANSI_RESET),
        Cell::Plain(_) => text.to_string(),
    }
}

// Width is counted in chars, so double-width glyphs (CJK, emoji) push the
// column out by one cell each.
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

/// Greedy word wrap on character counts; words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };

        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }

    lines
}
