//! Run identity encoded in log filenames.
//!
//! Example: `benchmark-sql-scan-20240101_120000.log`
//!   => benchmark `sql/scan`, timestamp `20240101_120000`

use crate::extract::patterns::{BENCHMARK_NAME, RUN_TIMESTAMP};

pub const UNKNOWN_BENCHMARK: &str = "unknown";

/// `<category>/<name>` from the filename, or `"unknown"`.
pub fn benchmark_id(filename: &str) -> String {
    match BENCHMARK_NAME.captures(filename) {
        Some(caps) => format!("{}/{}", &caps[1], &caps[2]),
        None => UNKNOWN_BENCHMARK.to_string(),
    }
}

pub fn run_timestamp(filename: &str) -> Option<String> {
    RUN_TIMESTAMP
        .captures(filename)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_category_name_and_timestamp() {
        let name = "benchmark-sql-scan-20240101_120000.log";
        assert_eq!(benchmark_id(name), "sql/scan");
        assert_eq!(run_timestamp(name).as_deref(), Some("20240101_120000"));
    }

    #[test]
    fn unrecognized_names_use_sentinels() {
        assert_eq!(benchmark_id("spark-driver.log"), UNKNOWN_BENCHMARK);
        assert_eq!(run_timestamp("spark-driver.log"), None);
    }

    #[test]
    fn needs_three_segments_after_prefix() {
        // Only two dash-delimited segments: not a benchmark name.
        assert_eq!(benchmark_id("benchmark-micro-wordcount.log"), UNKNOWN_BENCHMARK);
        assert_eq!(
            benchmark_id("benchmark-micro-wordcount-large.log"),
            "micro/wordcount"
        );
    }
}
