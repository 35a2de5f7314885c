// Text rendering of the scores and of the questionnaire.

use crate::inventory::*;

const CHART_WIDTH: usize = 40;

/// A horizontal bar chart of the dimension means, on the scale of the answers.
pub fn render_chart(rows: &[(String, f64)]) -> String {
    let name_width = rows.iter().map(|(d, _)| d.chars().count()).max().unwrap_or(0);
    let scale_max = SCALE_MAX as f64;
    rows.iter()
        .map(|(dimension, mean)| {
            let filled = ((mean.clamp(0.0, scale_max) / scale_max) * CHART_WIDTH as f64).round()
                as usize;
            format!(
                "{:<width$} |{}{} {}",
                dimension,
                "#".repeat(filled),
                " ".repeat(CHART_WIDTH - filled),
                format_mean(*mean),
                width = name_width
            )
        })
        .collect::<Vec<String>>()
        .join("\n")
}

/// The summary shown to a respondent once the submission is scored.
pub fn render_submission(info: &SubmissionInfo, summary: &ScoreSummary, chart: bool) -> String {
    let rows = dimension_rows(summary);
    let mut out = format!(
        "Respondent: {}\nDate: {}\nOrganization: {}\nScored items: {}\nOverall mean: {}\n\n{}",
        info.respondent,
        info.date,
        info.organization,
        summary.scored_items,
        format_mean(summary.overall),
        render_dimension_table(&rows)
    );
    if chart && !rows.is_empty() {
        out.push_str("\n\n");
        out.push_str(&render_chart(&rows));
    }
    out
}

/// The questionnaire, one section per dimension.
pub fn render_form(catalog: &Catalog) -> String {
    let mut out = format!(
        "Answer each statement from {} (strongly disagree) to {} (strongly agree), or {}.\n",
        SCALE_MIN, SCALE_MAX, NOT_APPLICABLE
    );
    for dimension in catalog.dimensions() {
        out.push('\n');
        out.push_str(&dimension);
        out.push('\n');
        for item in catalog.items_in(&dimension) {
            out.push_str("  ");
            out.push_str(&item.label());
            out.push('\n');
        }
    }
    out
}
