//! Report data structures for commands.
//!
//! Commands collect data into a report, then render it to an [`Output`].

mod check;
mod generate;
mod info;
mod output;

pub use check::CheckReport;
pub use generate::GenerateReport;
pub use info::{InfoReport, TargetInfo};
#[cfg(test)]
pub use output::StringOutput;
pub use output::{Output, Report, TerminalOutput};
