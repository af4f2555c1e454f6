use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use catalyst_graph::io::Format;

#[derive(Parser)]
#[command(
    name = "cgraph",
    about = "Fuse drug-pair SMILES and synergy scores into attributed graphs",
    version,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v debug, -vv trace); overrides CGRAPH_LOG
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fuse every row of a pair dataset into combined graphs (JSON / JSON Lines)
    #[command(visible_alias = "f")]
    Fuse(FuseArgs),

    /// Render one fused pair as a Graphviz DOT graph
    #[command(visible_alias = "r")]
    Render(RenderArgs),
}

impl Command {
    pub fn quiet(&self) -> bool {
        match self {
            Command::Fuse(args) => args.io.quiet,
            Command::Render(args) => args.io.quiet,
        }
    }
}

/// I/O options shared by all commands.
#[derive(Args)]
pub struct IoOptions {
    /// Input dataset (CSV with header; stdin if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Dataset layout options shared by all commands.
#[derive(Args)]
#[command(next_help_heading = "Dataset")]
pub struct DatasetOptions {
    /// Pipeline configuration (TOML file); flags below override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Column holding the first molecule's SMILES [default: Drug1]
    #[arg(long = "drug1-col", value_name = "NAME")]
    pub drug1: Option<String>,

    /// Column holding the second molecule's SMILES [default: Drug2]
    #[arg(long = "drug2-col", value_name = "NAME")]
    pub drug2: Option<String>,

    /// Outcome columns in score-node order (comma-separated)
    /// [default: CSS,Synergy_ZIP,Synergy_Bliss,Synergy_Loewe,Synergy_HSA,Y]
    #[arg(long, value_name = "COLS", value_delimiter = ',')]
    pub metrics: Vec<String>,

    /// Field delimiter, a single ASCII character [default: ,]
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,
}

/// Score node options shared by all commands.
#[derive(Args)]
#[command(next_help_heading = "Fusion")]
pub struct FusionOptions {
    /// Width of the score node feature row; must equal the number of metrics
    /// [default: 6]
    #[arg(long = "score-width", value_name = "N")]
    pub score_width: Option<usize>,
}

#[derive(Args)]
pub struct FuseArgs {
    #[command(flatten)]
    pub io: IoOptions,

    /// Output format (inferred from extension if not specified)
    #[arg(long = "outfmt", value_name = "FORMAT")]
    pub output_format: Option<GraphOutputFormat>,

    /// Exit with an error if any row fails (successful rows are still written)
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub dataset: DatasetOptions,

    #[command(flatten)]
    pub fusion: FusionOptions,
}

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub io: IoOptions,

    #[command(flatten)]
    pub selection: PairSelection,

    #[command(flatten)]
    pub dataset: DatasetOptions,

    #[command(flatten)]
    pub fusion: FusionOptions,
}

/// Which pair to render.
#[derive(Args)]
#[command(next_help_heading = "Pair Selection")]
pub struct PairSelection {
    /// Zero-based data row of the input dataset
    #[arg(long, value_name = "N", conflicts_with = "pair", required_unless_present = "pair")]
    pub row: Option<usize>,

    /// Two SMILES strings given directly
    #[arg(
        long,
        num_args = 2,
        value_names = ["DRUG1", "DRUG2"],
        requires = "scores"
    )]
    pub pair: Option<Vec<String>>,

    /// Outcome values for --pair (comma-separated)
    #[arg(
        long,
        value_name = "VALUES",
        value_delimiter = ',',
        allow_hyphen_values = true,
        requires = "pair"
    )]
    pub scores: Vec<f32>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GraphOutputFormat {
    /// One JSON object per line
    #[value(name = "jsonl", alias = "ndjson")]
    JsonLines,
    /// A single JSON array
    Json,
}

impl From<GraphOutputFormat> for Format {
    fn from(format: GraphOutputFormat) -> Self {
        match format {
            GraphOutputFormat::JsonLines => Format::JsonLines,
            GraphOutputFormat::Json => Format::Json,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fuse_flags_parse() {
        let cli = Cli::try_parse_from([
            "cgraph",
            "fuse",
            "-i",
            "pairs.csv",
            "-o",
            "out.jsonl",
            "--metrics",
            "a,b,c",
            "--score-width",
            "3",
            "--strict",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Command::Fuse(args) = cli.command else {
            panic!("expected fuse");
        };
        assert!(args.strict);
        assert_eq!(args.dataset.metrics, vec!["a", "b", "c"]);
        assert_eq!(args.fusion.score_width, Some(3));
    }

    #[test]
    fn render_requires_a_selection() {
        assert!(Cli::try_parse_from(["cgraph", "render"]).is_err());
        assert!(Cli::try_parse_from(["cgraph", "render", "--row", "2", "--pair", "C", "N"]).is_err());
        assert!(Cli::try_parse_from(["cgraph", "render", "--pair", "C", "N"]).is_err());

        let cli = Cli::try_parse_from([
            "cgraph", "render", "--pair", "C", "N", "--scores", "1,-2.5,3,4,5,6",
        ])
        .unwrap();
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.selection.pair, Some(vec!["C".to_string(), "N".to_string()]));
        assert_eq!(args.selection.scores, vec![1.0, -2.5, 3.0, 4.0, 5.0, 6.0]);
    }
}
