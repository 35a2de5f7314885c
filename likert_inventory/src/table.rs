/*!
The dimension table: the text form of a score summary.

```text
Dimension | Mean
--- | ---
Respect | 2.00
Teamwork | 4.38
```

A table produced by [render_dimension_table] can be read back with
[parse_dimension_table], and rendering the parsed rows gives the same text.
*/

use log::debug;

use crate::config::*;

const TABLE_HEADER: &str = "Dimension | Mean";
const TABLE_SEPARATOR: &str = "--- | ---";

/// Means are always presented with 2 decimals.
pub fn format_mean(mean: f64) -> String {
    format!("{:.2}", mean)
}

/// The rows of the dimension table, in the order of the summary.
pub fn dimension_rows(summary: &ScoreSummary) -> Vec<(String, f64)> {
    summary
        .dimensions
        .iter()
        .map(|d| (d.dimension.clone(), d.mean))
        .collect()
}

pub fn render_dimension_table(rows: &[(String, f64)]) -> String {
    let mut lines: Vec<String> = vec![TABLE_HEADER.to_string(), TABLE_SEPARATOR.to_string()];
    for (dimension, mean) in rows.iter() {
        lines.push(format!("{} | {}", dimension, format_mean(*mean)));
    }
    lines.join("\n")
}

/// Reads back a table produced by `render_dimension_table`.
///
/// Errors report the line number (starting at 1) of the first line that
/// is not a `dimension | mean` row.
pub fn parse_dimension_table(table: &str) -> Result<Vec<(String, f64)>, InventoryErrors> {
    let mut res: Vec<(String, f64)> = Vec::new();
    for (idx, line) in table.lines().enumerate() {
        let lineno = idx + 1;
        // Header and separator.
        if idx < 2 {
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        let (dimension, mean_s) = line
            .rsplit_once(" | ")
            .ok_or(InventoryErrors::MalformedTable(lineno))?;
        let mean: f64 = mean_s
            .trim()
            .parse()
            .map_err(|_| InventoryErrors::MalformedTable(lineno))?;
        res.push((dimension.to_string(), mean));
    }
    debug!("parse_dimension_table: {:?}", res);
    Ok(res)
}
