// Response snapshots stored as JSON.

use serde::{Deserialize, Serialize};
use serde_json::Map as JSMap;

use crate::inventory::{io_common::make_default_id, *};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonSnapshot {
    respondent: Option<String>,
    date: Option<String>,
    organization: Option<String>,
    observations: Option<String>,
    #[serde(default)]
    responses: JSMap<String, JSValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum JsonSnapshots {
    Many(Vec<JsonSnapshot>),
    Single(JsonSnapshot),
}

/// The raw text of an answer. Numbers are read as they are written, null is unanswered.
fn raw_answer(v: &JSValue) -> String {
    match v {
        JSValue::Null => "".to_string(),
        JSValue::String(s) => s.clone(),
        x => x.to_string(),
    }
}

pub fn read_json_snapshots(path: &str) -> InvResult<Vec<ParsedSubmission>> {
    let default_id = make_default_id(path);
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let snapshots: JsonSnapshots =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    let snapshots = match snapshots {
        JsonSnapshots::Single(s) => vec![s],
        JsonSnapshots::Many(v) => v,
    };
    debug!("read_json_snapshots: {} snapshots", snapshots.len());

    let res = snapshots
        .into_iter()
        .enumerate()
        .map(|(idx, s)| ParsedSubmission {
            id: default_id(idx + 1),
            answers: s
                .responses
                .iter()
                .map(|(item_id, v)| (item_id.clone(), raw_answer(v)))
                .collect(),
            respondent: s.respondent,
            date: s.date,
            organization: s.organization,
            observations: s.observations,
        })
        .collect();
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn answer_values() {
        assert_eq!(raw_answer(&json!(4)), "4");
        assert_eq!(raw_answer(&json!(4.0)), "4.0");
        assert_eq!(raw_answer(&json!("N/A")), "N/A");
        assert_eq!(raw_answer(&json!(null)), "");
        assert_eq!(raw_answer(&json!(true)), "true");
    }

    #[test]
    fn single_or_many() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"respondent": "Ana", "responses": {{"RES01": 4, "RES05": "N/A"}}}}"#
        )
        .unwrap();
        let res = read_json_snapshots(f.path().to_str().unwrap()).unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].respondent.as_deref(), Some("Ana"));
        assert_eq!(res[0].date, None);
        assert_eq!(res[0].answers.len(), 2);

        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"[{{"respondent": "Ana", "responses": {{}}}}, {{"respondent": "Bruno"}}]"#
        )
        .unwrap();
        let res = read_json_snapshots(f.path().to_str().unwrap()).unwrap();
        assert_eq!(res.len(), 2);
        assert!(res[1].answers.is_empty());
    }

    #[test]
    fn bad_json() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{{\"respondent\": ").unwrap();
        let res = read_json_snapshots(f.path().to_str().unwrap());
        assert!(matches!(res, Err(InventoryError::ParsingJson { .. })));
        let res = read_json_snapshots("/nonexistent/snapshot.json");
        assert!(matches!(res, Err(InventoryError::OpeningJson { .. })));
    }
}
