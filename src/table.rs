//! Plain-text table rendering for the console client.

use crate::dto::MovieDto;

/// Renders `rows` under `headers` as a bordered table, one line per row.
///
/// Columns are as wide as their widest cell. Rows shorter than the header are padded
/// with empty cells.
pub fn render<S: AsRef<str>>(headers: &[&str], rows: &[Vec<S>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.as_ref().chars().count());
        }
    }

    let border = {
        let mut line = String::from("+");
        for w in &widths {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
        }
        line
    };

    let format_row = |cells: Vec<&str>| {
        let mut line = String::from("|");
        for (i, w) in widths.iter().enumerate() {
            let cell = cells.get(i).copied().unwrap_or("");
            let pad = w - cell.chars().count();
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(pad + 1));
            line.push('|');
        }
        line
    };

    let mut out = Vec::with_capacity(rows.len() + 4);
    out.push(border.clone());
    out.push(format_row(headers.to_vec()));
    out.push(border.clone());
    for row in rows {
        out.push(format_row(row.iter().map(|c| c.as_ref()).collect()));
    }
    out.push(border);

    out.join("\n")
}

/// A JSON value as a console line: strings bare, anything else as JSON.
pub fn plain_value(value: &serde_json::Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

/// Movies as a Title / Year / Duration table, sorted by title.
pub fn movie_table(movies: &[MovieDto]) -> String {
    let mut sorted: Vec<&MovieDto> = movies.iter().collect();
    sorted.sort_by(|a, b| a.title.cmp(&b.title));

    let rows: Vec<Vec<String>> = sorted
        .into_iter()
        .map(|m| vec![m.title.clone(), m.year.to_string(), m.duration.to_string()])
        .collect();

    render(&["Title", "Year", "Duration"], &rows)
}
