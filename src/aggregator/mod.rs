use crate::parser::PartialResult;
use crate::pipeline::TaskLabel;
use serde::Serialize;

/// One extracted clause plus the chunk/category it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledHighlight {
    pub label: String,
    pub text: String,
}

/// Final merged report for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedReport {
    pub summary: String,
    pub highlights: Vec<LabeledHighlight>,
}

impl AggregatedReport {
    /// Empty report for a fatal configuration fault: no tasks were
    /// dispatched, and the summary says why.
    pub fn configuration_failure(reason: &str) -> Self {
        Self {
            summary: format!("Analysis could not run: {reason}"),
            highlights: Vec::new(),
        }
    }
}

/// Merge the per-task results into one report. An absent slot is a failed
/// task; an `ok=false` result is a recovered parse or provider failure.
/// Both count toward the totals, neither contributes highlights.
/// Deterministic: the same ordered input always produces the same report.
pub fn combine(results: &[Option<PartialResult>]) -> AggregatedReport {
    let total = results.len();

    let mut highlights = Vec::new();
    // First-appearance order, never hash order, so the summary is stable.
    let mut category_counts: Vec<(String, usize)> = Vec::new();
    let mut ok_count = 0usize;

    for result in results.iter().flatten() {
        if !result.ok {
            continue;
        }
        ok_count += 1;

        for text in &result.highlights {
            highlights.push(LabeledHighlight {
                label: result.label.to_string(),
                text: text.clone(),
            });
        }

        if let TaskLabel::Category { name } = &result.label {
            match category_counts.iter_mut().find(|(n, _)| n == name) {
                Some((_, count)) => *count += result.highlights.len(),
                None => category_counts.push((name.clone(), result.highlights.len())),
            }
        }
    }

    let summary = if ok_count == 0 {
        format!(
            "No clauses could be extracted: 0 of {} analysis task(s) produced a usable result.",
            total
        )
    } else {
        let mut summary = format!(
            "{} of {} analysis task(s) succeeded; {} notable clause(s) found.",
            ok_count,
            total,
            highlights.len()
        );
        if category_counts.len() > 1 {
            let per_category: Vec<String> = category_counts
                .iter()
                .map(|(name, count)| format!("{name}: {count}"))
                .collect();
            summary.push_str(&format!(" By category: {}.", per_category.join(", ")));
        }
        summary
    };

    AggregatedReport {
        summary,
        highlights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_result(label: TaskLabel, highlights: &[&str]) -> Option<PartialResult> {
        Some(PartialResult::success(
            label,
            None,
            highlights.iter().map(|s| s.to_string()).collect(),
        ))
    }

    fn chunk(index: usize, total: usize) -> TaskLabel {
        TaskLabel::Chunk { index, total }
    }

    fn category(name: &str) -> TaskLabel {
        TaskLabel::Category {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_empty_input_is_explicit_no_clauses() {
        let report = combine(&[]);
        assert!(report.highlights.is_empty());
        assert!(report.summary.contains("No clauses could be extracted"));
        assert!(report.summary.contains("0 of 0"));
    }

    #[test]
    fn test_partial_failure_isolation_two_of_five() {
        let results = vec![
            ok_result(chunk(0, 5), &["A"]),
            None,
            Some(PartialResult::failure(chunk(2, 5), "provider error: quota")),
            ok_result(chunk(3, 5), &["B", "C"]),
            None,
        ];
        let report = combine(&results);

        let texts: Vec<&str> = report.highlights.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B", "C"]);
        assert!(report.summary.contains("2 of 5"));
        assert!(report.summary.contains("3 notable clause(s)"));
    }

    #[test]
    fn test_all_failed_is_not_presented_as_success() {
        let results = vec![
            None,
            Some(PartialResult::failure(chunk(1, 2), "not valid JSON")),
        ];
        let report = combine(&results);
        assert!(report.highlights.is_empty());
        assert!(report.summary.contains("No clauses could be extracted"));
        assert!(report.summary.contains("0 of 2"));
    }

    #[test]
    fn test_highlights_keep_input_order_and_labels() {
        let results = vec![
            ok_result(category("privacy"), &["P1", "P2"]),
            ok_result(category("billing"), &["B1"]),
        ];
        let report = combine(&results);
        assert_eq!(
            report.highlights,
            vec![
                LabeledHighlight {
                    label: "privacy".into(),
                    text: "P1".into()
                },
                LabeledHighlight {
                    label: "privacy".into(),
                    text: "P2".into()
                },
                LabeledHighlight {
                    label: "billing".into(),
                    text: "B1".into()
                },
            ]
        );
    }

    #[test]
    fn test_per_category_counts_in_first_appearance_order() {
        let results = vec![
            ok_result(category("privacy"), &["P1"]),
            ok_result(category("billing"), &["B1", "B2"]),
            ok_result(category("privacy"), &["P2"]),
        ];
        let report = combine(&results);
        assert!(report
            .summary
            .contains("By category: privacy: 2, billing: 2."));
    }

    #[test]
    fn test_single_category_omits_breakdown() {
        let results = vec![ok_result(category("privacy"), &["P1"])];
        let report = combine(&results);
        assert!(!report.summary.contains("By category"));
    }

    #[test]
    fn test_idempotent_for_identical_input() {
        let results = vec![
            ok_result(category("privacy"), &["P1"]),
            None,
            ok_result(category("billing"), &["B1"]),
        ];
        assert_eq!(combine(&results), combine(&results));
    }

    #[test]
    fn test_configuration_failure_is_empty_with_reason() {
        let report = AggregatedReport::configuration_failure("No API key configured");
        assert!(report.highlights.is_empty());
        assert!(report.summary.contains("No API key configured"));
    }
}
