use std::process::ExitCode;

/// Exit status for the CLI.
///
/// - `Success` (0): analysis completed, or unused keys found without `--exit-code`
/// - `UnusedKeys(n)`: unused keys found and `--exit-code n` given
/// - `Error` (2): invalid input, missing files, invalid regex, missing dependency
/// - `Interrupted` (130): terminated by a signal before the analysis finished
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    UnusedKeys(u8),
    Error,
    Interrupted,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::UnusedKeys(code) => ExitCode::from(code),
            ExitStatus::Error => ExitCode::from(2),
            ExitStatus::Interrupted => ExitCode::from(130),
        }
    }
}
