// Append-only record stores for the accepted submissions.

use std::fs::OpenOptions;

use crate::inventory::*;

pub const RESPONSES_HEADER: [&str; 7] = [
    "Timestamp",
    "Respondent",
    "Date",
    "Organization",
    "Dimension",
    "Item",
    "Response",
];

pub const OBSERVATIONS_HEADER: [&str; 4] = ["Timestamp", "Respondent", "Date", "Observation"];

/// A destination for records. Rows are only ever appended.
pub trait RecordSink {
    fn append_rows(&mut self, rows: &[Vec<String>]) -> InvResult<()>;
}

/// A CSV file. The header is written when the file is created (or empty).
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: String,
    header: Vec<String>,
}

impl CsvSink {
    pub fn new(path: &str, header: &[&str]) -> CsvSink {
        CsvSink {
            path: path.to_string(),
            header: header.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RecordSink for CsvSink {
    fn append_rows(&mut self, rows: &[Vec<String>]) -> InvResult<()> {
        let path = self.path.as_str();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .context(SinkIoSnafu { path })?;
        let is_new = file.metadata().context(SinkIoSnafu { path })?.len() == 0;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            debug!("append_rows: {}: writing header", path);
            wtr.write_record(&self.header)
                .context(SinkWriteSnafu { path })?;
        }
        for row in rows.iter() {
            wtr.write_record(row).context(SinkWriteSnafu { path })?;
        }
        wtr.flush().context(SinkIoSnafu { path })?;
        Ok(())
    }
}

/// One answer of one respondent, as stored in the responses sink.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResponseRecord {
    pub timestamp: String,
    pub respondent: String,
    pub date: String,
    pub organization: String,
    pub dimension: String,
    pub item: String,
    pub response: String,
}

impl ResponseRecord {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.respondent.clone(),
            self.date.clone(),
            self.organization.clone(),
            self.dimension.clone(),
            self.item.clone(),
            self.response.clone(),
        ]
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ObservationRecord {
    pub timestamp: String,
    pub respondent: String,
    pub date: String,
    pub observation: String,
}

impl ObservationRecord {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.respondent.clone(),
            self.date.clone(),
            self.observation.clone(),
        ]
    }
}

/// One record per item of the catalog, in catalog order.
/// Unanswered items are recorded as N/A.
pub fn response_records(
    catalog: &Catalog,
    response: &Response,
    info: &SubmissionInfo,
    timestamp: &str,
) -> Vec<ResponseRecord> {
    catalog
        .items()
        .iter()
        .map(|item| ResponseRecord {
            timestamp: timestamp.to_string(),
            respondent: info.respondent.clone(),
            date: info.date.clone(),
            organization: info.organization.clone(),
            dimension: item.dimension.clone(),
            item: item.prompt.clone(),
            response: response
                .get(&item.id)
                .map(|a| a.to_record())
                .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
        })
        .collect()
}

/// The observation of a respondent, if there is anything to record.
pub fn observation_record(info: &SubmissionInfo, timestamp: &str) -> Option<ObservationRecord> {
    let text = info.observations.as_ref()?.trim();
    if text.is_empty() {
        return None;
    }
    Some(ObservationRecord {
        timestamp: timestamp.to_string(),
        respondent: info.respondent.clone(),
        date: info.date.clone(),
        observation: text.to_string(),
    })
}
