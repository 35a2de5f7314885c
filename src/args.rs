use clap::Parser;

/// This is a scoring and collection program for interpersonal factors inventories.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON configuration of the survey: sources of responses, rules, sinks.
    /// For more information about the file format, read the documentation of the likert_inventory crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing the summary of a survey in JSON format. If provided, invscore will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the survey will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) If specified, the file containing the responses. Setting this option overrides
    /// the sources that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (json, csv or xlsx) The type of the input. If not provided, it is guessed from the extension of the file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path) The CSV file to which the answers of accepted submissions are appended.
    #[clap(long, value_parser)]
    pub responses_sink: Option<String>,

    /// (file path) The CSV file to which the observations of the respondents are appended.
    #[clap(long, value_parser)]
    pub observations_sink: Option<String>,

    /// (true or false, default true) Rejects the submissions that do not give a numeric answer to
    /// at least half of the items.
    #[clap(long, value_parser)]
    pub require_minimum_coverage: Option<bool>,

    /// (true or false, default true) Appends the observations of the respondents to the observations sink.
    #[clap(long, value_parser)]
    pub collect_observations: Option<bool>,

    /// (true or false, default false) Prints a bar chart of the dimensions after each summary.
    #[clap(long, value_parser)]
    pub render_chart: Option<bool>,

    // Other arguments
    /// If passed as an argument, prints the questionnaire and exits.
    #[clap(long, takes_value = false)]
    pub print_form: bool,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
