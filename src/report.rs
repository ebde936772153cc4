use crate::aggregator::AggregatedReport;
use crate::error::OutputError;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Wire shape of one analysis: `summary` and `highlights` are always
/// present, with `highlights` empty rather than absent. The origin label
/// is folded into each highlight as `[label] text`, the shape the
/// consuming front-end splits back apart.
#[derive(Debug, Serialize)]
pub struct WireReport {
    pub summary: String,
    pub highlights: Vec<String>,
}

impl From<&AggregatedReport> for WireReport {
    fn from(report: &AggregatedReport) -> Self {
        Self {
            summary: report.summary.clone(),
            highlights: report
                .highlights
                .iter()
                .map(|h| format!("[{}] {}", h.label, h.text))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SavedReport {
    generated_at: String,
    #[serde(flatten)]
    report: WireReport,
}

pub fn to_json(report: &AggregatedReport) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(&WireReport::from(report))?)
}

/// Write the wire report, plus a generation timestamp, to a file.
pub fn write_report(path: &Path, report: &AggregatedReport) -> Result<(), OutputError> {
    let saved = SavedReport {
        generated_at: Utc::now().to_rfc3339(),
        report: WireReport::from(report),
    };
    let json = serde_json::to_string_pretty(&saved)?;
    fs::write(path, json).map_err(OutputError::WriteReport)
}

pub fn render_text(report: &AggregatedReport) -> String {
    let mut content = String::new();

    content.push_str("# Terms of Service Analysis\n\n");
    content.push_str(&format!("{}\n", report.summary));

    if report.highlights.is_empty() {
        content.push_str("\n*No notable clauses*\n");
    } else {
        content.push_str(&format!(
            "\n## Notable Clauses ({})\n\n",
            report.highlights.len()
        ));
        for highlight in &report.highlights {
            content.push_str(&format!("- **[{}]** {}\n", highlight.label, highlight.text));
        }
    }

    content
}
