// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// The lowest point of the Likert scale (strongly disagree).
pub const SCALE_MIN: u8 = 1;
/// The highest point of the Likert scale (strongly agree).
pub const SCALE_MAX: u8 = 5;

/// The label used for "not applicable" answers, both when reading and when persisting.
pub const NOT_APPLICABLE: &str = "N/A";

/// An entry of the questionnaire.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Item {
    /// The dimension (group of questions) this item belongs to.
    pub dimension: String,
    /// Unique identifier, for example `RES04`.
    pub id: String,
    /// The statement shown to the respondent.
    pub prompt: String,
    /// A reverse item is phrased so that agreeing is a negative signal.
    pub reverse: bool,
}

impl Item {
    /// The label shown on a form, for example `(RES04) Disrespectful interruptions happen often. (R)`.
    pub fn label(&self) -> String {
        if self.reverse {
            format!("({}) {} (R)", self.id, self.prompt)
        } else {
            format!("({}) {}", self.id, self.prompt)
        }
    }
}

/// All the possible states of an answer to a single item.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Answer {
    /// The respondent explicitly chose "N/A".
    NotApplicable,
    /// A point on the scale, guaranteed to be within [SCALE_MIN, SCALE_MAX].
    Score(u8),
    /// Some content that is not a point on the scale.
    /// It is kept so that it can be written back as-is, but it never counts in a score.
    Malformed(String),
}

impl Answer {
    /// Interprets the raw content of a form cell.
    ///
    /// Returns None for blank content: the item was not answered at all.
    pub fn parse(raw: &str) -> Option<Answer> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }
        if s.eq_ignore_ascii_case(NOT_APPLICABLE) || s.eq_ignore_ascii_case("NA") {
            return Some(Answer::NotApplicable);
        }
        let num: Option<i64> = match s.parse::<i64>() {
            Ok(x) => Some(x),
            Err(_) => match s.parse::<f64>() {
                Ok(f) if f.is_finite() && f.fract() == 0.0 => Some(f as i64),
                _ => None,
            },
        };
        match num {
            Some(x) if x >= SCALE_MIN as i64 && x <= SCALE_MAX as i64 => {
                Some(Answer::Score(x as u8))
            }
            _ => Some(Answer::Malformed(s.to_string())),
        }
    }

    /// The raw value of a genuine numeric answer.
    pub fn score(&self) -> Option<u8> {
        match self {
            Answer::Score(x) => Some(*x),
            _ => None,
        }
    }

    /// The text written to a worksheet for this answer.
    pub fn to_record(&self) -> String {
        match self {
            Answer::NotApplicable => NOT_APPLICABLE.to_string(),
            Answer::Score(x) => x.to_string(),
            Answer::Malformed(s) => s.clone(),
        }
    }
}

/// The answers of one respondent, keyed by item identifier.
///
/// Absent items are unanswered. Selecting an item again replaces the previous answer.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Response {
    pub answers: HashMap<String, Answer>,
}

impl Response {
    pub fn new() -> Response {
        Response {
            answers: HashMap::new(),
        }
    }

    pub fn select(&mut self, item_id: &str, answer: Answer) {
        self.answers.insert(item_id.to_string(), answer);
    }

    pub fn get(&self, item_id: &str) -> Option<&Answer> {
        self.answers.get(item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

// ******** Output data structures *********

/// The mean corrected score of one dimension, rounded to 2 decimals.
#[derive(PartialEq, Debug, Clone)]
pub struct DimensionSummary {
    pub dimension: String,
    pub mean: f64,
    /// Number of items that contributed to the mean.
    pub count: usize,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ScoreSummary {
    /// Mean of all the corrected scores. Not rounded, see `overall_rounded`.
    pub overall: f64,
    /// Sorted by ascending mean: the most concerning dimension comes first.
    pub dimensions: Vec<DimensionSummary>,
    /// Number of items that contributed to the overall mean.
    pub scored_items: usize,
}

impl ScoreSummary {
    pub const EMPTY: ScoreSummary = ScoreSummary {
        overall: 0.0,
        dimensions: Vec::new(),
        scored_items: 0,
    };

    pub fn overall_rounded(&self) -> f64 {
        round2(self.overall)
    }
}

/// Rounds to 2 decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Outcome of the check performed before a response can be submitted.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Readiness {
    Ready,
    /// Nothing was scored. Only reported when the coverage gate is disabled:
    /// the submission goes through with a warning.
    Empty,
    /// The coverage gate is enabled and not enough items were answered.
    InsufficientCoverage { answered: usize, required: usize },
}

/// Errors that prevent a catalog, a response or a dimension table from being built.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum InventoryErrors {
    EmptyCatalog,
    DuplicateItem(String),
    UnknownItem(String),
    /// The line (starting at 1) of a dimension table that cannot be read.
    MalformedTable(usize),
}

impl Error for InventoryErrors {}

impl Display for InventoryErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InventoryErrors::EmptyCatalog => write!(f, "the catalog does not contain any item"),
            InventoryErrors::DuplicateItem(id) => {
                write!(f, "item {} is declared more than once in the catalog", id)
            }
            InventoryErrors::UnknownItem(id) => write!(f, "item {} is not in the catalog", id),
            InventoryErrors::MalformedTable(lineno) => {
                write!(f, "line {} of the dimension table cannot be read", lineno)
            }
        }
    }
}

// ********* Configuration **********

/// The variants of the questionnaire that are supported by the same scoring core.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct InventoryRules {
    /// When set, a response is only accepted if at least half of the catalog
    /// received a numeric answer. When not set, any response is accepted and
    /// an empty one only triggers a warning.
    pub require_minimum_coverage: bool,
    /// Whether the free-text observations are persisted.
    pub collect_observations: bool,
    /// Whether the dimension table is also rendered as a chart.
    pub render_chart: bool,
}

impl InventoryRules {
    pub const DEFAULT_RULES: InventoryRules = InventoryRules {
        require_minimum_coverage: true,
        collect_observations: true,
        render_chart: false,
    };
}
