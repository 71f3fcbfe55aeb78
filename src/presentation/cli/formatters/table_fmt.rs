use std::time::Duration;

use colored::Colorize;

use crate::domain::entities::sample::Sample;
use crate::domain::value_objects::status::Status;

/// Width of the dashed rule under the header.
pub const RULE_WIDTH: usize = 70;

/// Column header of the per-tick table.
#[must_use]
pub fn format_header() -> String {
    format!(
        "{:^8} | {:^10} | {:^10} | {:^12} | {:^10}",
        "Time", "CPU %", "Memory %", "Memory Used", "Status"
    )
}

#[must_use]
pub fn format_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// One table row: elapsed time, CPU %, memory %, memory used (GiB) and status.
///
/// The status cell is padded before colouring so escape codes do not
/// disturb the alignment.
#[must_use]
pub fn format_row(elapsed: Duration, sample: &Sample, status: Status) -> String {
    let status_cell = format!("{status:^10}");
    let status_cell = match status {
        Status::Ok => status_cell.green(),
        Status::CpuHigh | Status::MemHigh => status_cell.yellow(),
        Status::Critical => status_cell.red().bold(),
    };

    format!(
        "{:^8} | {:^10.1} | {:^10.1} | {:^12.2} GB | {}",
        format_elapsed(elapsed),
        sample.cpu_percent,
        sample.memory_percent,
        sample.memory_used_gib(),
        status_cell
    )
}

/// Whole seconds print as integers, sub-second intervals keep one decimal.
fn format_elapsed(elapsed: Duration) -> String {
    if elapsed.subsec_nanos() == 0 {
        elapsed.as_secs().to_string()
    } else {
        format!("{:.1}", elapsed.as_secs_f64())
    }
}
