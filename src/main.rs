use std::env::args_os;
use std::process::ExitCode;

use imgfilter::{process_raw_images, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    let mut exit_code = ExitCode::SUCCESS;
    for report in process_raw_images(&arguments) {
        match report.result {
            Ok(geometry) => println!(
                "{} -> {} ({})",
                report.job.input_file.display(),
                report.job.output_file.display(),
                geometry
            ),
            Err(e) => {
                eprintln!(
                    "Processing of {} failed because of: {}",
                    report.job.input_file.display(),
                    e
                );
                exit_code = ExitCode::FAILURE;
            }
        }
    }
    exit_code
}
