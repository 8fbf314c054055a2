use homedigest_core::{Dataset, ParseStats};
use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "homedigest".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Turn archived listing digests into a table\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print timing information with color coding
pub fn print_timing(label: &str, duration: std::time::Duration) {
    let ms = duration.as_secs_f64() * 1000.0;
    let label = format!("{}:", label);

    if ms < 250.0 {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "fast".dimmed());
    } else if ms < 1000.0 {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "moderate".bright_yellow());
    } else {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "slow".bright_red());
    }
}

/// Print the run counters and deduplication totals
pub fn print_stats_summary(dataset: &Dataset) {
    let stats: &ParseStats = &dataset.stats;

    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Parse Statistics".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());

    for (name, count) in stats.entries() {
        let line = format!("  {:<22} {:>8}", format!("{}:", name), count);
        if name.starts_with("missing_") && count > 0 {
            eprintln!("{}", line.bright_yellow());
        } else {
            eprintln!("{}", line.dimmed());
        }
    }

    eprintln!(
        "  {} {}",
        "Duplicates dropped:".dimmed(),
        format!("{} strict, {} content", dataset.dedup.strict_dropped, dataset.dedup.content_dropped).bright_white()
    );
    eprintln!(
        "  {} {}\n",
        "Listings written:".dimmed(),
        dataset.listings.len().to_string().bold().bright_white()
    );
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
