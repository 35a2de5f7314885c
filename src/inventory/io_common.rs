// Primitives shared by the tabular readers (CSV and Excel).

use std::path::Path;

use crate::inventory::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Identifiers for the rows of a file, used in the logs.
pub fn make_default_id(path: &str) -> impl Fn(usize) -> String {
    let simplified_file_name = simplify_file_name(path);
    move |lineno| format!("{}-{:08}", simplified_file_name, lineno)
}

/// The item a column refers to: either its identifier, or its label
/// as shown on the form, which starts with `(ID)`.
pub fn match_item_column(header: &str, catalog: &Catalog) -> Option<String> {
    let h = header.trim();
    if catalog.get(h).is_some() {
        return Some(h.to_string());
    }
    let inner = h.strip_prefix('(')?;
    let (id, _) = inner.split_once(')')?;
    let id = id.trim();
    catalog.get(id).map(|_| id.to_string())
}

/// Where each field of a submission is found in a row.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct HeaderLayout {
    pub width: usize,
    pub respondent: Option<usize>,
    pub date: Option<usize>,
    pub organization: Option<usize>,
    pub observations: Option<usize>,
    /// Pairs of (column index, item id).
    pub items: Vec<(usize, String)>,
}

impl HeaderLayout {
    pub fn from_header(header: &[Option<String>], cfs: &FileSource, catalog: &Catalog) -> HeaderLayout {
        let find = |name: &str| -> Option<usize> {
            header.iter().position(|h| {
                h.as_ref()
                    .map(|s| s.trim().eq_ignore_ascii_case(name))
                    .unwrap_or(false)
            })
        };
        let mut items: Vec<(usize, String)> = Vec::new();
        for (idx, h) in header.iter().enumerate() {
            match h.as_ref().and_then(|s| match_item_column(s, catalog)) {
                Some(item_id) => items.push((idx, item_id)),
                None => {
                    debug!("from_header: column {} {:?} is not an item", idx, h);
                }
            }
        }
        let layout = HeaderLayout {
            width: header.len(),
            respondent: find(cfs.respondent_column()),
            date: find(cfs.date_column()),
            organization: find(cfs.organization_column()),
            observations: find(cfs.observations_column()),
            items,
        };
        if layout.items.is_empty() {
            warn!("from_header: no column matches an item of the catalog");
        }
        if layout.respondent.is_none() {
            warn!(
                "from_header: no respondent column named {:?}",
                cfs.respondent_column()
            );
        }
        layout
    }

    /// Assembles a submission from the text of the cells of a row.
    /// Returns None for rows where every cell is blank.
    pub fn assemble(&self, id: String, row: &[String]) -> Option<ParsedSubmission> {
        if row.iter().all(|c| c.trim().is_empty()) {
            return None;
        }
        let cell = |idx: Option<usize>| -> Option<String> {
            idx.and_then(|i| row.get(i)).map(|s| s.to_string())
        };
        let answers: Vec<(String, String)> = self
            .items
            .iter()
            .filter_map(|(idx, item_id)| row.get(*idx).map(|s| (item_id.clone(), s.clone())))
            .collect();
        Some(ParsedSubmission {
            id,
            respondent: cell(self.respondent),
            date: cell(self.date),
            organization: cell(self.organization),
            observations: cell(self.observations),
            answers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<Option<String>> {
        names.iter().map(|s| Some(s.to_string())).collect()
    }

    #[test]
    fn item_columns() {
        let catalog = Catalog::reference();
        assert_eq!(match_item_column("RES01", &catalog), Some("RES01".to_string()));
        assert_eq!(
            match_item_column("(RES04) Disrespectful interruptions happen often. (R)", &catalog),
            Some("RES04".to_string())
        );
        assert_eq!(match_item_column("(XYZ01) Something", &catalog), None);
        assert_eq!(match_item_column("Respondent", &catalog), None);
        assert_eq!(match_item_column("(RES01", &catalog), None);
    }

    #[test]
    fn layout_and_rows() {
        let catalog = Catalog::reference();
        let cfs = FileSource::new("csv", "responses.csv", None);
        let layout = HeaderLayout::from_header(
            &header(&["respondent", "Date", "RES01", "Comment", "(RES04) Whatever"]),
            &cfs,
            &catalog,
        );
        assert_eq!(layout.respondent, Some(0));
        assert_eq!(layout.date, Some(1));
        assert_eq!(layout.observations, None);
        assert_eq!(
            layout.items,
            vec![(2, "RES01".to_string()), (4, "RES04".to_string())]
        );

        let row: Vec<String> = ["Ana", "05/03/2025", "4", "x", ""]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let ps = layout.assemble("f-00000002".to_string(), &row).unwrap();
        assert_eq!(ps.respondent.as_deref(), Some("Ana"));
        assert_eq!(ps.observations, None);
        assert_eq!(
            ps.answers,
            vec![
                ("RES01".to_string(), "4".to_string()),
                ("RES04".to_string(), "".to_string())
            ]
        );

        let blank: Vec<String> = vec!["".to_string(), " ".to_string()];
        assert_eq!(layout.assemble("f-00000003".to_string(), &blank), None);
    }

    #[test]
    fn default_ids() {
        let default_id = make_default_id("data/form/responses.csv");
        assert_eq!(default_id(3), "responses.csv-00000003");
    }
}
