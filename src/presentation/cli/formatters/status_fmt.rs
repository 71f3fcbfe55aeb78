use colored::{ColoredString, Colorize};

/// Share of the threshold at which a reading turns yellow.
const NEAR_THRESHOLD_RATIO: f64 = 0.85;

#[must_use]
pub fn progress_bar(value: f64, width: usize, threshold: f64) -> String {
    let ratio = (value / 100.0).clamp(0.0, 1.0);
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let bar_filled = "\u{2588}".repeat(filled);
    let bar_empty = "\u{2591}".repeat(empty);

    let colored_bar = if value >= threshold {
        bar_filled.red().bold()
    } else if value >= threshold * NEAR_THRESHOLD_RATIO {
        bar_filled.yellow()
    } else {
        bar_filled.green()
    };

    format!("{colored_bar}{bar_empty}")
}

/// Formats a percentage, red at or above the threshold, yellow when close.
#[must_use]
pub fn colorize_percent(value: f64, threshold: f64) -> ColoredString {
    let text = format!("{value:.1}%");
    if value >= threshold {
        text.red().bold()
    } else if value >= threshold * NEAR_THRESHOLD_RATIO {
        text.yellow()
    } else {
        text.green()
    }
}

pub fn print_section_header(title: &str) {
    println!("{}", title.bold().cyan());
    let display_width = title.chars().count();
    println!("{}", "\u{2500}".repeat(display_width).cyan());
}
