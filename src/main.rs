use clap::{Parser, Subcommand};
use json2xlsx::cli;
use json2xlsx::error::ConvertResult;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "json2xlsx")]
#[command(about = "Build .xlsx workbooks from JSON documents")]
#[command(long_about = "json2xlsx - Build .xlsx workbooks from JSON documents

Each worksheet in the document becomes a sheet, in document order, with its
column widths, row heights, cell values, merges and cell styles applied.
The first error aborts the run and nothing is written.

COMMANDS:
  create   - Create an .xlsx file from a JSON document

EXAMPLES:
  json2xlsx create report.json report.xlsx
  json2xlsx create report.json             # uses the document's file_name

LOGGING:
  RUST_LOG=json2xlsx=debug json2xlsx create report.json report.xlsx")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Create an .xlsx file from a JSON document.

DOCUMENT SHAPE:
  {
    \"file_name\": \"report.xlsx\",
    \"worksheets\": [ {
      \"sheet\": \"Summary\",
      \"columns\": [ { \"column\": \"A\", \"width\": 24 } ],
      \"rows\":    [ { \"row\": 1, \"height\": 30 } ],
      \"cells\":   [ { \"cell\": \"A1\", \"value\": \"Total\", \"merge\": \"C1\",
                     \"style\": { \"font\": { \"bold\": true } } } ]
    } ]
  }

Absent fields keep Excel's defaults. The output file is overwritten.")]
    /// Create an .xlsx file from a JSON document
    Create {
        /// Path to the JSON document
        input: PathBuf,

        /// Output Excel file path (.xlsx); defaults to the document's file_name
        #[arg(env = "JSON2XLSX_OUTPUT")]
        output: Option<PathBuf>,

        /// Show verbose build steps
        #[arg(short, long)]
        verbose: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "json2xlsx=debug"
    } else {
        "json2xlsx=warn"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

fn main() -> ConvertResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Create {
            input,
            output,
            verbose,
        } => {
            init_tracing(verbose);
            cli::create(input, output, verbose)
        }
    }
}
