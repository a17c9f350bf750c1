use crate::batch::ProcessingResult;

/// File name of the report inside each run directory and archive.
pub const REPORT_FILE_NAME: &str = "report.txt";

/// Render the plain-text processing report.
///
/// Layout: header, four count lines, then one line per successful URL
/// (prefixed `✓`) and one per failure (`✗ url: error`).
pub fn convert_to_report(result: &ProcessingResult) -> String {
    let mut report = String::new();

    report.push_str(&format!("Processing Report\n{}\n\n", "=".repeat(50)));
    report.push_str(&format!("Total URLs submitted: {}\n", result.total_submitted));
    report.push_str(&format!("Successfully processed: {}\n", result.total_completed));
    report.push_str(&format!("Failed: {}\n", result.failed.len()));
    report.push_str(&format!("Empty content: {}\n\n", result.empty_content.len()));

    report.push_str("Successful URLs:\n");
    for url in &result.successful {
        report.push_str(&format!("✓ {}\n", url));
    }

    report.push_str("\nFailed URLs:\n");
    for failure in &result.failed {
        report.push_str(&format!("✗ {}: {}\n", failure.url, failure.error));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::FailedUrl;

    #[test]
    fn test_report_empty_run() {
        let report = convert_to_report(&ProcessingResult::default());
        let expected = format!(
            "Processing Report\n{}\n\nTotal URLs submitted: 0\nSuccessfully processed: 0\nFailed: 0\nEmpty content: 0\n\nSuccessful URLs:\n\nFailed URLs:\n",
            "=".repeat(50)
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_report_lists_outcomes() {
        let result = ProcessingResult {
            total_submitted: 3,
            total_completed: 1,
            successful: vec!["https://a.example/ok".to_string()],
            failed: vec![
                FailedUrl::new("https://b.example/missing", "Article extraction error: HTTP request failed: 404"),
                FailedUrl::new("https://c.example/blank", "No content found"),
            ],
            empty_content: vec!["https://c.example/blank".to_string()],
        };

        let report = convert_to_report(&result);
        assert!(report.contains("Total URLs submitted: 3\n"));
        assert!(report.contains("Successfully processed: 1\n"));
        assert!(report.contains("Failed: 2\n"));
        assert!(report.contains("Empty content: 1\n"));
        assert!(report.contains("✓ https://a.example/ok\n"));
        assert!(report.contains("✗ https://b.example/missing: Article extraction error: HTTP request failed: 404\n"));
        assert!(report.contains("✗ https://c.example/blank: No content found\n"));

        let successes = report.find("Successful URLs:").unwrap();
        let failures = report.find("Failed URLs:").unwrap();
        assert!(successes < report.find('✓').unwrap());
        assert!(failures < report.find('✗').unwrap());
    }
}
