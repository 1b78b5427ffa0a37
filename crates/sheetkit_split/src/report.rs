//! Batch report model and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

use crate::spec::{EnumSplitOutput, SpecRenderError};

/// Aggregate counters, diagnostics, and output for one `process_split` run.
#[derive(Debug, Clone)]
pub struct ReportSplit {
    /// Number of partitions attempted.
    pub cnt_partitions: u64,
    /// Number of documents successfully encoded.
    pub cnt_successful: u64,
    /// Number of partitions whose document failed to encode.
    pub cnt_failed: u64,
    /// Per-partition render failures.
    pub errors: Vec<SpecRenderError>,
    /// Non-fatal warnings collected during the run.
    pub warnings: Vec<String>,
    /// Produced documents or bundled archive.
    pub output: EnumSplitOutput,
}

impl ReportSplit {
    /// Number of collected render failures.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_partitions".to_string(), self.cnt_partitions);
        dict_counts.insert("cnt_successful".to_string(), self.cnt_successful);
        dict_counts.insert("cnt_failed".to_string(), self.cnt_failed);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} total={} successful={} failed={} warnings={}",
            dict_counts["cnt_partitions"],
            dict_counts["cnt_successful"],
            dict_counts["cnt_failed"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[SPLIT]"))
    }
}

/// Mutable accumulator for batch statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportSplitBuilder {
    /// See [`ReportSplit::cnt_partitions`].
    pub cnt_partitions: u64,
    /// See [`ReportSplit::cnt_successful`].
    pub cnt_successful: u64,
    /// See [`ReportSplit::cnt_failed`].
    pub cnt_failed: u64,
    /// See [`ReportSplit::errors`].
    pub errors: Vec<SpecRenderError>,
    /// See [`ReportSplit::warnings`].
    pub warnings: Vec<String>,
}

impl ReportSplitBuilder {
    /// Record one successfully rendered partition.
    pub fn add_successful(&mut self) {
        self.cnt_partitions += 1;
        self.cnt_successful += 1;
    }

    /// Record one failed partition with its error text.
    pub fn add_failed(&mut self, key: String, exception: String) {
        self.cnt_partitions += 1;
        self.cnt_failed += 1;
        self.errors.push(SpecRenderError { key, exception });
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self, output: EnumSplitOutput) -> ReportSplit {
        ReportSplit {
            cnt_partitions: self.cnt_partitions,
            cnt_successful: self.cnt_successful,
            cnt_failed: self.cnt_failed,
            errors: self.errors,
            warnings: self.warnings,
            output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ReportSplitBuilder;
    use crate::spec::EnumSplitOutput;

    #[test]
    fn report_counts_and_format_follow_outcome_fold() {
        let mut builder = ReportSplitBuilder::default();
        builder.add_successful();
        builder.add_successful();
        builder.add_failed("vault".to_string(), "disk full".to_string());
        builder.add_warning("w".to_string());

        let report = builder.build(EnumSplitOutput::Documents(vec![]));
        assert_eq!(report.cnt_partitions, 3);
        assert_eq!(report.cnt_successful, 2);
        assert_eq!(report.cnt_failed, 1);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.errors[0].key, "vault");

        let txt = report.format("[SPLIT]");
        assert_eq!(txt, "[SPLIT] total=3 successful=2 failed=1 warnings=1");
        assert_eq!(report.to_string(), txt);
    }
}
