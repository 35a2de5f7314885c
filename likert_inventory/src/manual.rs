/*!

This is the long-form manual for `likert_inventory` and `invscore`.

## Scoring

Every item is answered on a Likert scale from 1 (strongly disagree) to 5
(strongly agree), or marked `N/A`. Items marked `(R)` are reverse items: the
score used in the averages is `6 - answer`. This convention is part of the
meaning of the stored data and must not change between collections.

- the mean of each dimension only uses the items of that dimension that
  received a number, and it is rounded to 2 decimals;
- the overall mean uses every item that received a number;
- `N/A`, blank and anything that is not a number between 1 and 5 are left out
  of all the averages.

The dimensions are listed from the lowest mean to the highest one.

## Input formats

The following formats are supported:
* `json` response snapshots
* `csv` Comma Separated Values, one respondent per row
* `xlsx` Excel exports from online forms, one respondent per row

### `json`

A single snapshot or an array of snapshots:

```text
{
  "respondent": "Ana",
  "date": "05/03/2025",
  "observations": "Meetings run late.",
  "responses": { "RES01": 4, "RES04": 2, "RES05": "N/A" }
}
```

`date` and `organization` are optional.

### `csv`

```text
Respondent,Date,COM01,COM02,...,LID08,Observations
Ana,05/03/2025,4,N/A,...,5,Meetings run late.
```

The item columns are found by their header: either the identifier of the
item (`COM01`) or its label as shown on the form (`(COM01) Messages are clear...`).
Columns that do not match an item are ignored. An empty cell is an unanswered item.

### `xlsx`

The same layout as `csv`, in an Excel worksheet. Numeric cells are read as numbers.
If the workbook contains more than one worksheet, its name must be provided.

## Configuration

`invscore` comes with sensible defaults, a configuration file in JSON can
override them:

```text
{
  "outputSettings": {
    "surveyName": "Interpersonal factors 2025",
    "collectingOrganization": "Instituto Wedja de Socionomia",
    "outputPath": "summary.json"
  },
  "sources": [ { "provider": "csv", "filePath": "responses.csv" } ],
  "rules": {
    "requireMinimumCoverage": true,
    "collectObservations": true,
    "renderChart": false
  },
  "sinks": {
    "responsesPath": "Fatores_Interpessoais.csv",
    "observationsPath": "Observacoes.csv"
  },
  "catalogPath": "catalog.csv"
}
```

All the paths are relative to the directory of the configuration file.

Options for sources:
 - `provider` (string, optional): `json`, `csv` or `xlsx`. Defaults to `csv`.
 - `respondentColumn`, `dateColumn`, `organizationColumn`, `observationsColumn`
   (string, optional): the headers of the identification columns. They default
   to `Respondent`, `Date`, `Organization` and `Observations`. A missing date is
   replaced by the current day, a missing organization by the collecting
   organization.
 - `excelWorksheetName` (string, optional): for Excel inputs, the name of the worksheet.

Rules:
 - `requireMinimumCoverage`: when `true`, a respondent must give a numeric
   answer to at least half of the items, otherwise the submission is rejected.
   When `false`, every submission is accepted and an empty one only produces a warning.
 - `collectObservations`: when `true`, non-empty observations are appended to the observations sink.
 - `renderChart`: when `true`, a bar chart of the dimensions is printed after the table.

The catalog file, if provided, replaces the reference inventory. It is a CSV
file with the header `dimension,id,prompt,reverse`.

## Sinks

Every accepted submission appends one row per item of the catalog to the
responses sink, in catalog order:

```text
Timestamp,Respondent,Date,Organization,Dimension,Item,Response
```

Unanswered items are written as `N/A`. Rows are only ever appended.

When observations are collected, the non-empty ones are appended to the
observations sink:

```text
Timestamp,Respondent,Date,Observation
```

A header is written when a sink file is created or empty.

## Command line

```text
invscore --config survey/config.json --reference survey/expected_summary.json
invscore --input responses.csv --responses-sink Fatores_Interpessoais.csv --out stdout
invscore --print-form
```

Command line options take precedence over the configuration file.
 */
