use folio_core::BatchOutput;
use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Folio".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Turn article URLs into Word and PDF documents\n".dimmed());
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

/// Print the per-URL outcome and the location of the run's files
pub fn print_summary(output: &BatchOutput) {
    let result = &output.result;

    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Run Summary".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!("  {} {}", "Run:".dimmed(), output.run_id.to_string().bright_white());
    eprintln!(
        "  {} {}",
        "Submitted:".dimmed(),
        result.total_submitted.to_string().bright_white()
    );
    eprintln!(
        "  {} {}",
        "Completed:".dimmed(),
        result.total_completed.to_string().bright_white()
    );
    eprintln!("  {} {}\n", "Empty:".dimmed(), result.empty_content.len().to_string().bright_white());

    for url in &result.successful {
        print_success(url);
    }
    for failure in &result.failed {
        print_error(&format!("{}: {}", failure.url, failure.error));
    }

    let archive_size = std::fs::metadata(&output.archive_path).map(|m| m.len() as usize).unwrap_or(0);
    eprintln!(
        "\n  {} {} ({})",
        "Archive:".dimmed(),
        output.archive_path.display().bright_white(),
        format_size(archive_size)
    );
    eprintln!("  {} {}\n", "Report:".dimmed(), output.report_path.display().bright_white());
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024 + 512 * 1024), "3.5 MB");
    }
}
