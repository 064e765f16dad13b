use std::process::ExitCode;

use cxtprep::CxtError;

fn main() -> ExitCode {
    match cxtprep::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            if let CxtError::ValidationFailed { report, .. } = &err {
                eprint!("{report}");
            }
            ExitCode::FAILURE
        }
    }
}
