// Primitives for reading CSV files.

use crate::inventory::{
    io_common::{make_default_id, HeaderLayout},
    *,
};

/// Reads a CSV export: a header row, then one respondent per row.
pub fn read_csv_responses(
    path: &str,
    cfs: &FileSource,
    catalog: &Catalog,
) -> InvResult<Vec<ParsedSubmission>> {
    let default_id = make_default_id(path);

    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut records = rdr.into_records();

    let header: Vec<Option<String>> = records
        .next()
        .context(MissingHeaderSnafu { path })?
        .context(CsvLineParseSnafu {})?
        .iter()
        .map(|s| Some(s.trim_start_matches('\u{feff}').to_string()))
        .collect();
    debug!("read_csv_responses: header: {:?}", header);
    let layout = HeaderLayout::from_header(&header, cfs, catalog);

    let mut res: Vec<ParsedSubmission> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        // The header is on line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu {})?;
        let row: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        if row.iter().all(|c| c.trim().is_empty()) {
            debug!("read_csv_responses: lineno: {:?} is empty, skipped", lineno);
            continue;
        }
        ensure!(row.len() >= layout.width, RowTooShortSnafu { lineno });
        debug!("read_csv_responses: lineno: {:?} row: {:?}", lineno, &row);
        if let Some(ps) = layout.assemble(default_id(lineno), &row) {
            res.push(ps);
        }
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{}", contents).unwrap();
        f
    }

    #[test]
    fn reads_rows() {
        let f = write_file(
            "Respondent,Date,(RES01) Interactions are cordial and polite.,RES04,Observations\n\
             Ana,05/03/2025,4,2,Meetings run late.\n\
             ,,,,\n\
             Bruno,,N/A,,\n",
        );
        let path = f.path().to_str().unwrap();
        let cfs = FileSource::new("csv", path, None);
        let res = read_csv_responses(path, &cfs, &Catalog::reference()).unwrap();
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].respondent.as_deref(), Some("Ana"));
        assert_eq!(res[0].observations.as_deref(), Some("Meetings run late."));
        assert_eq!(
            res[0].answers,
            vec![
                ("RES01".to_string(), "4".to_string()),
                ("RES04".to_string(), "2".to_string())
            ]
        );
        assert_eq!(res[1].respondent.as_deref(), Some("Bruno"));
        assert_eq!(res[1].date.as_deref(), Some(""));
        assert!(res[1].id.ends_with("-00000004"));
    }

    #[test]
    fn short_rows_are_errors() {
        let f = write_file("Respondent,RES01,RES02\nAna,4\n");
        let path = f.path().to_str().unwrap();
        let cfs = FileSource::new("csv", path, None);
        let res = read_csv_responses(path, &cfs, &Catalog::reference());
        assert!(matches!(res, Err(InventoryError::RowTooShort { lineno: 2 })));
    }

    #[test]
    fn empty_file_has_no_header() {
        let f = write_file("");
        let path = f.path().to_str().unwrap();
        let cfs = FileSource::new("csv", path, None);
        let res = read_csv_responses(path, &cfs, &Catalog::reference());
        assert!(matches!(res, Err(InventoryError::MissingHeader { .. })));
    }
}
