use anyhow::Result;

pub mod args;
mod exit_status;
mod report;
mod run;

pub use args::Arguments;
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let result = run::run(args)?;
    report::print(&result.analysis, &result.config)?;

    let exit_code = result.config.exit_code;
    if exit_code > 0 && result.analysis.has_unused() {
        Ok(ExitStatus::UnusedKeys(exit_code))
    } else {
        Ok(ExitStatus::Success)
    }
}
