// Batch transform: merge BOM spreadsheets into the flat parts file served by jig-readiness.
//
// Usage:
//   cargo run --bin transform_parts -- <output.csv> <input.xlsx|input.csv>...
//
// Prints the transform report as JSON; exits non-zero when no input could be parsed.

use std::path::PathBuf;
use std::process::ExitCode;

use jig_readiness::importer::PartsTransformer;
use jig_readiness::logging;

const USAGE: &str = "usage: transform_parts <output.csv> <input>...";

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let mut args = std::env::args().skip(1);
    let output = match args.next().map(PathBuf::from) {
        Some(path) => path,
        None => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };
    let inputs: Vec<PathBuf> = args.map(PathBuf::from).collect();
    if inputs.is_empty() {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    }

    match PartsTransformer::default()
        .transform_files(&inputs, &output)
        .await
    {
        Ok(report) => {
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("report serialization failed: {}", e),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("transform failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
