mod config;
use log::{debug, info};

use std::collections::HashMap;

pub mod builder;
pub mod catalog;
pub mod manual;
pub mod table;

pub use crate::catalog::Catalog;
pub use crate::config::*;

/// The score of an item after the reverse correction.
///
/// For a raw value on the scale, the result is also on the scale.
pub fn corrected_score(raw: u8, reverse: bool) -> u8 {
    if reverse {
        (SCALE_MAX + SCALE_MIN) - raw
    } else {
        raw
    }
}

// An item that received a numeric answer.
#[derive(Eq, PartialEq, Debug, Clone)]
struct ScoredItem<'a> {
    dimension: &'a str,
    score: u8,
}

fn scored_items<'a>(catalog: &'a Catalog, response: &Response) -> Vec<ScoredItem<'a>> {
    catalog
        .items()
        .iter()
        .filter_map(|item| match response.get(&item.id) {
            Some(Answer::Score(raw)) => Some(ScoredItem {
                dimension: item.dimension.as_str(),
                score: corrected_score(*raw, item.reverse),
            }),
            Some(a) => {
                debug!("scored_items: skipping {}: {:?}", item.id, a);
                None
            }
            None => None,
        })
        .collect()
}

/// Computes the scores of a response.
///
/// Arguments:
/// * `catalog` the items of the questionnaire
/// * `response` the answers, which may cover only part of the catalog
///
/// Items that are unanswered, not applicable or malformed are left out.
/// The overall mean is 0 and the table is empty if nothing can be scored.
/// The dimension table is sorted by ascending mean, so that the weakest
/// dimension comes first. Dimensions with the same mean keep the catalog order.
pub fn compute_scores(catalog: &Catalog, response: &Response) -> ScoreSummary {
    let scored = scored_items(catalog, response);
    debug!(
        "compute_scores: {} scored items out of {} answers",
        scored.len(),
        response.answers.len()
    );
    if scored.is_empty() {
        return ScoreSummary::EMPTY;
    }

    let mut totals: HashMap<&str, (u64, usize)> = HashMap::new();
    for s in scored.iter() {
        let e = totals.entry(s.dimension).or_insert((0, 0));
        e.0 += s.score as u64;
        e.1 += 1;
    }

    let mut dimensions: Vec<DimensionSummary> = catalog
        .dimensions()
        .into_iter()
        .filter_map(|dimension| {
            totals.get(dimension.as_str()).map(|(total, count)| {
                let mean = round2(*total as f64 / *count as f64);
                DimensionSummary {
                    dimension: dimension.clone(),
                    mean,
                    count: *count,
                }
            })
        })
        .collect();
    // Stable sort: ties stay in catalog order.
    dimensions.sort_by(|a, b| a.mean.total_cmp(&b.mean));

    let total: u64 = scored.iter().map(|s| s.score as u64).sum();
    let overall = total as f64 / scored.len() as f64;

    info!(
        "compute_scores: overall {:.2} over {} items, {} dimensions",
        overall,
        scored.len(),
        dimensions.len()
    );
    ScoreSummary {
        overall,
        dimensions,
        scored_items: scored.len(),
    }
}

/// The number of catalog items with a genuine numeric answer.
///
/// Answers to identifiers that are not in the catalog are not counted.
pub fn count_scored(response: &Response, catalog: &Catalog) -> usize {
    catalog
        .items()
        .iter()
        .filter(|item| matches!(response.get(&item.id), Some(Answer::Score(_))))
        .count()
}

/// The minimum number of numeric answers for a response to be submittable: half of
/// the catalog, rounded up.
pub fn required_answers(catalog: &Catalog) -> usize {
    (catalog.len() + 1) / 2
}

/// True if at least half of the catalog received a numeric answer.
pub fn is_submittable(response: &Response, catalog: &Catalog) -> bool {
    count_scored(response, catalog) >= required_answers(catalog)
}

/// Checks whether a response can be submitted under the given rules.
pub fn submission_readiness(
    response: &Response,
    catalog: &Catalog,
    rules: &InventoryRules,
) -> Readiness {
    let answered = count_scored(response, catalog);
    if rules.require_minimum_coverage {
        let required = required_answers(catalog);
        if answered >= required {
            Readiness::Ready
        } else {
            Readiness::InsufficientCoverage { answered, required }
        }
    } else if answered == 0 {
        Readiness::Empty
    } else {
        Readiness::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn item(dimension: &str, id: &str, reverse: bool) -> Item {
        Item {
            dimension: dimension.to_string(),
            id: id.to_string(),
            prompt: format!("Prompt for {}", id),
            reverse,
        }
    }

    fn respect_catalog() -> Catalog {
        Catalog::new(vec![
            item("Respect", "RES01", false),
            item("Respect", "RES04", true),
        ])
        .unwrap()
    }

    fn response(answers: &[(&str, Answer)]) -> Response {
        let mut r = Response::new();
        for (id, a) in answers.iter() {
            r.select(id, a.clone());
        }
        r
    }

    #[test]
    fn reverse_correction_stays_on_scale() {
        for v in SCALE_MIN..=SCALE_MAX {
            assert_eq!(corrected_score(v, false), v);
            assert_eq!(corrected_score(v, true), 6 - v);
            assert!((SCALE_MIN..=SCALE_MAX).contains(&corrected_score(v, true)));
        }
    }

    #[test]
    fn empty_response() {
        init();
        let summary = compute_scores(&Catalog::reference(), &Response::new());
        assert_eq!(summary.overall, 0.0);
        assert!(summary.dimensions.is_empty());
        assert_eq!(summary.scored_items, 0);
    }

    #[test]
    fn only_not_applicable() {
        init();
        let catalog = Catalog::reference();
        let mut r = Response::new();
        for i in catalog.items() {
            r.select(&i.id, Answer::NotApplicable);
        }
        assert_eq!(compute_scores(&catalog, &r), ScoreSummary::EMPTY);
    }

    #[test]
    fn respect_with_reverse_item() {
        init();
        let r = response(&[("RES01", Answer::Score(4)), ("RES04", Answer::Score(2))]);
        let summary = compute_scores(&respect_catalog(), &r);
        assert_eq!(summary.overall, 4.0);
        assert_eq!(
            summary.dimensions,
            vec![DimensionSummary {
                dimension: "Respect".to_string(),
                mean: 4.0,
                count: 2
            }]
        );
    }

    #[test]
    fn not_applicable_does_not_pull_the_mean() {
        init();
        let r = response(&[("RES01", Answer::NotApplicable), ("RES04", Answer::Score(3))]);
        let summary = compute_scores(&respect_catalog(), &r);
        assert_eq!(summary.overall, 3.0);
        assert_eq!(summary.dimensions.len(), 1);
        assert_eq!(summary.dimensions[0].mean, 3.0);
        assert_eq!(summary.dimensions[0].count, 1);
    }

    #[test]
    fn malformed_and_unknown_answers_are_ignored() {
        init();
        let r = response(&[
            ("RES01", Answer::Malformed("often".to_string())),
            ("RES04", Answer::Score(1)),
            ("XYZ01", Answer::Score(1)),
        ]);
        let summary = compute_scores(&respect_catalog(), &r);
        assert_eq!(summary.overall, 5.0);
        assert_eq!(summary.scored_items, 1);
    }

    #[test]
    fn same_value_everywhere_gives_that_mean() {
        init();
        let catalog = Catalog::reference();
        for v in SCALE_MIN..=SCALE_MAX {
            let mut r = Response::new();
            for i in catalog.items().iter().filter(|i| !i.reverse) {
                r.select(&i.id, Answer::Score(v));
            }
            let summary = compute_scores(&catalog, &r);
            assert_eq!(summary.overall, v as f64);
            assert!(summary.dimensions.iter().all(|d| d.mean == v as f64));
        }
    }

    #[test]
    fn dimensions_sorted_by_ascending_mean() {
        init();
        let catalog = Catalog::reference();
        let mut r = Response::new();
        // A different answer pattern for each dimension.
        for (idx, i) in catalog.items().iter().enumerate() {
            let raw = ((idx * 7 + idx / 8) % 5) as u8 + 1;
            r.select(&i.id, Answer::Score(raw));
        }
        let summary = compute_scores(&catalog, &r);
        assert_eq!(summary.dimensions.len(), 7);
        for w in summary.dimensions.windows(2) {
            assert!(w[0].mean <= w[1].mean, "{:?}", summary.dimensions);
        }
    }

    #[test]
    fn dimension_means_are_rounded_and_overall_is_not() {
        init();
        let catalog = Catalog::new(vec![
            item("Teamwork", "TE01", false),
            item("Teamwork", "TE02", false),
            item("Teamwork", "TE03", false),
            item("Leadership", "LID01", false),
        ])
        .unwrap();
        let r = response(&[
            ("TE01", Answer::Score(4)),
            ("TE02", Answer::Score(4)),
            ("TE03", Answer::Score(5)),
            ("LID01", Answer::Score(5)),
        ]);
        let summary = compute_scores(&catalog, &r);
        // 13 / 3
        assert_eq!(summary.dimensions[0].dimension, "Teamwork");
        assert_eq!(summary.dimensions[0].mean, 4.33);
        assert_eq!(summary.dimensions[1].dimension, "Leadership");
        assert_eq!(summary.dimensions[1].mean, 5.0);
        assert_eq!(summary.overall, 4.5);

        let r = response(&[
            ("TE01", Answer::Score(4)),
            ("TE02", Answer::Score(4)),
            ("TE03", Answer::Score(5)),
        ]);
        let summary = compute_scores(&catalog, &r);
        assert_eq!(summary.overall, 13.0 / 3.0);
        assert_eq!(summary.overall_rounded(), 4.33);
    }

    #[test]
    fn ties_keep_catalog_order() {
        init();
        let catalog = Catalog::new(vec![
            item("Values", "CONV01", false),
            item("Inclusion", "INC01", false),
            item("Respect", "RES01", false),
        ])
        .unwrap();
        let r = response(&[
            ("CONV01", Answer::Score(3)),
            ("INC01", Answer::Score(3)),
            ("RES01", Answer::Score(2)),
        ]);
        let names: Vec<String> = compute_scores(&catalog, &r)
            .dimensions
            .into_iter()
            .map(|d| d.dimension)
            .collect();
        assert_eq!(names, vec!["Respect", "Values", "Inclusion"]);
    }

    #[test]
    fn submittable_threshold_is_half_the_catalog() {
        let catalog = Catalog::reference();
        assert_eq!(required_answers(&catalog), 28);
        let mut r = Response::new();
        for i in catalog.items().iter().take(27) {
            r.select(&i.id, Answer::Score(3));
        }
        // N/A answers do not count.
        for i in catalog.items().iter().skip(27) {
            r.select(&i.id, Answer::NotApplicable);
        }
        assert_eq!(count_scored(&r, &catalog), 27);
        assert!(!is_submittable(&r, &catalog));
        r.select(&catalog.items()[27].id, Answer::Score(1));
        assert!(is_submittable(&r, &catalog));
    }

    #[test]
    fn submittable_rounds_up_for_odd_catalogs() {
        let catalog = Catalog::new(vec![
            item("Respect", "RES01", false),
            item("Respect", "RES02", false),
            item("Respect", "RES03", false),
        ])
        .unwrap();
        assert_eq!(required_answers(&catalog), 2);
        let r = response(&[("RES01", Answer::Score(3))]);
        assert!(!is_submittable(&r, &catalog));
    }

    #[test]
    fn readiness_with_and_without_gate() {
        let catalog = respect_catalog();
        let gated = InventoryRules::DEFAULT_RULES;
        let open = InventoryRules {
            require_minimum_coverage: false,
            ..InventoryRules::DEFAULT_RULES
        };

        let empty = Response::new();
        assert_eq!(
            submission_readiness(&empty, &catalog, &gated),
            Readiness::InsufficientCoverage {
                answered: 0,
                required: 1
            }
        );
        assert_eq!(
            submission_readiness(&empty, &catalog, &open),
            Readiness::Empty
        );

        let na = response(&[("RES01", Answer::NotApplicable)]);
        assert_eq!(submission_readiness(&na, &catalog, &open), Readiness::Empty);

        let one = response(&[("RES04", Answer::Score(5))]);
        assert_eq!(submission_readiness(&one, &catalog, &gated), Readiness::Ready);
        assert_eq!(submission_readiness(&one, &catalog, &open), Readiness::Ready);
    }

    #[test]
    fn answer_parsing() {
        assert_eq!(Answer::parse(""), None);
        assert_eq!(Answer::parse("   "), None);
        assert_eq!(Answer::parse("N/A"), Some(Answer::NotApplicable));
        assert_eq!(Answer::parse("n/a"), Some(Answer::NotApplicable));
        assert_eq!(Answer::parse("NA"), Some(Answer::NotApplicable));
        assert_eq!(Answer::parse(" 4 "), Some(Answer::Score(4)));
        assert_eq!(Answer::parse("4.0"), Some(Answer::Score(4)));
        assert_eq!(Answer::parse("1"), Some(Answer::Score(1)));
        assert_eq!(Answer::parse("5"), Some(Answer::Score(5)));
        assert_eq!(Answer::parse("0"), Some(Answer::Malformed("0".to_string())));
        assert_eq!(Answer::parse("7"), Some(Answer::Malformed("7".to_string())));
        assert_eq!(
            Answer::parse("4.5"),
            Some(Answer::Malformed("4.5".to_string()))
        );
        assert_eq!(
            Answer::parse("abc"),
            Some(Answer::Malformed("abc".to_string()))
        );
        assert_eq!(Answer::Score(3).to_record(), "3");
        assert_eq!(Answer::NotApplicable.to_record(), "N/A");
    }
}
