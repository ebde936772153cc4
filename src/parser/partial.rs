use crate::pipeline::TaskLabel;

/// Parsed outcome of exactly one remote call, before aggregation.
/// Never mutated after creation. `ok` carries success/failure to the
/// aggregator without an error path.
#[derive(Debug, Clone)]
pub struct PartialResult {
    pub label: TaskLabel,
    pub highlights: Vec<String>,
    pub summary_fragment: Option<String>,
    pub ok: bool,
}

impl PartialResult {
    pub fn success(
        label: TaskLabel,
        summary_fragment: Option<String>,
        highlights: Vec<String>,
    ) -> Self {
        Self {
            label,
            highlights,
            summary_fragment,
            ok: true,
        }
    }

    /// A recovered failure: no highlights, the fragment explains why.
    pub fn failure(label: TaskLabel, reason: impl Into<String>) -> Self {
        Self {
            label,
            highlights: Vec::new(),
            summary_fragment: Some(reason.into()),
            ok: false,
        }
    }
}
