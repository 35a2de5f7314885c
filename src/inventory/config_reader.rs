use crate::inventory::*;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_ORGANIZATION: &str = "Instituto Wedja de Socionomia";
pub const DEFAULT_SURVEY_NAME: &str = "Interpersonal Factors Inventory";

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "surveyName")]
    pub survey_name: Option<String>,
    #[serde(rename = "collectingOrganization")]
    pub collecting_organization: Option<String>,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

impl OutputSettings {
    pub fn survey_name(&self) -> String {
        self.survey_name
            .clone()
            .unwrap_or_else(|| DEFAULT_SURVEY_NAME.to_string())
    }

    pub fn collecting_organization(&self) -> String {
        self.collecting_organization
            .clone()
            .unwrap_or_else(|| DEFAULT_ORGANIZATION.to_string())
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub survey: String,
    pub organization: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    #[serde(rename = "provider")]
    _provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    #[serde(rename = "respondentColumn")]
    pub respondent_column: Option<String>,
    #[serde(rename = "dateColumn")]
    pub date_column: Option<String>,
    #[serde(rename = "organizationColumn")]
    pub organization_column: Option<String>,
    #[serde(rename = "observationsColumn")]
    pub observations_column: Option<String>,
}

impl FileSource {
    pub fn new(provider: &str, file_path: &str, excel_worksheet_name: Option<String>) -> FileSource {
        FileSource {
            _provider: Some(provider.to_string()),
            file_path: file_path.to_string(),
            excel_worksheet_name,
            respondent_column: None,
            date_column: None,
            organization_column: None,
            observations_column: None,
        }
    }

    /// The input type, lower case. Defaults to csv.
    pub fn provider(&self) -> String {
        self._provider
            .clone()
            .unwrap_or_else(|| "csv".to_string())
            .to_lowercase()
    }

    pub fn respondent_column(&self) -> &str {
        self.respondent_column.as_deref().unwrap_or("Respondent")
    }

    pub fn date_column(&self) -> &str {
        self.date_column.as_deref().unwrap_or("Date")
    }

    pub fn organization_column(&self) -> &str {
        self.organization_column
            .as_deref()
            .unwrap_or("Organization")
    }

    pub fn observations_column(&self) -> &str {
        self.observations_column
            .as_deref()
            .unwrap_or("Observations")
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesSettings {
    #[serde(rename = "requireMinimumCoverage")]
    pub require_minimum_coverage: Option<bool>,
    #[serde(rename = "collectObservations")]
    pub collect_observations: Option<bool>,
    #[serde(rename = "renderChart")]
    pub render_chart: Option<bool>,
}

impl RulesSettings {
    pub fn to_rules(&self) -> InventoryRules {
        let d = InventoryRules::DEFAULT_RULES;
        InventoryRules {
            require_minimum_coverage: self
                .require_minimum_coverage
                .unwrap_or(d.require_minimum_coverage),
            collect_observations: self.collect_observations.unwrap_or(d.collect_observations),
            render_chart: self.render_chart.unwrap_or(d.render_chart),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SinkSettings {
    #[serde(rename = "responsesPath")]
    pub responses_path: Option<String>,
    #[serde(rename = "observationsPath")]
    pub observations_path: Option<String>,
}

impl SinkSettings {
    pub fn open(&self) -> Sinks {
        Sinks {
            responses: self.responses_path.as_ref().map(|p| {
                Box::new(CsvSink::new(p, &RESPONSES_HEADER)) as Box<dyn RecordSink>
            }),
            observations: self.observations_path.as_ref().map(|p| {
                Box::new(CsvSink::new(p, &OBSERVATIONS_HEADER)) as Box<dyn RecordSink>
            }),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(default)]
    pub sources: Vec<FileSource>,
    #[serde(default)]
    pub rules: RulesSettings,
    #[serde(default)]
    pub sinks: SinkSettings,
    #[serde(rename = "catalogPath")]
    pub catalog_path: Option<String>,
}

impl InventoryConfig {
    /// Resolves all the paths of this configuration against the given directory.
    pub fn relative_to(self, root: &Path) -> InventoryConfig {
        let resolve = |p: String| -> String {
            if p == "stdout" {
                return p;
            }
            let full: PathBuf = root.join(p);
            full.display().to_string()
        };
        InventoryConfig {
            output_settings: OutputSettings {
                output_path: self.output_settings.output_path.map(resolve),
                ..self.output_settings
            },
            sources: self
                .sources
                .into_iter()
                .map(|cfs| FileSource {
                    file_path: resolve(cfs.file_path.clone()),
                    ..cfs
                })
                .collect(),
            rules: self.rules,
            sinks: SinkSettings {
                responses_path: self.sinks.responses_path.map(resolve),
                observations_path: self.sinks.observations_path.map(resolve),
            },
            catalog_path: self.catalog_path.map(resolve),
        }
    }

    /// The catalog to use: the one from the catalog file, or the reference one.
    pub fn catalog(&self) -> InvResult<Catalog> {
        match self.catalog_path.as_ref() {
            Some(p) => read_catalog(p),
            None => Ok(Catalog::reference()),
        }
    }
}

pub fn read_config(path: &str) -> InvResult<InventoryConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: InventoryConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    info!("config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: String) -> InvResult<JSValue> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_summary: {:?}", js);
    Ok(js)
}

/// Reads a catalog in CSV format, with the columns `dimension,id,prompt,reverse`.
pub fn read_catalog(path: &str) -> InvResult<Catalog> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut items: Vec<Item> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        let line = line_r.context(CsvLineParseSnafu {})?;
        // The header is on line 1.
        let lineno = idx + 2;
        let field = |i: usize| -> InvResult<String> {
            line.get(i)
                .map(|s| s.to_string())
                .context(RowTooShortSnafu { lineno })
        };
        let id = field(1)?;
        let reverse_s = field(3)?;
        let reverse = parse_reverse_flag(&reverse_s).context(CatalogReverseFlagSnafu {
            id: id.clone(),
            value: reverse_s.clone(),
        })?;
        items.push(Item {
            dimension: field(0)?,
            id,
            prompt: field(2)?,
            reverse,
        });
    }
    debug!("read_catalog: {} items", items.len());
    Catalog::new(items).context(InvalidCatalogSnafu { path })
}

fn parse_reverse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "sim" | "1" | "r" => Some(true),
        "false" | "no" | "não" | "nao" | "0" | "" => Some(false),
        _ => None,
    }
}
