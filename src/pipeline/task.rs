use crate::chunker::Chunk;
use crate::config::Category;
use std::fmt;

/// Origin of one unit of remote work: a document position, or a named
/// analytical lens. The dispatcher is generic over both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskLabel {
    Chunk { index: usize, total: usize },
    Category { name: String },
}

impl fmt::Display for TaskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskLabel::Chunk { index, total } => write!(f, "part {}/{}", index + 1, total),
            TaskLabel::Category { name } => write!(f, "{}", name),
        }
    }
}

/// One outbound call: owned by the dispatcher for its lifetime, destroyed
/// once its outcome is folded into the aggregator.
#[derive(Debug, Clone)]
pub struct AnalysisTask {
    pub label: TaskLabel,
    pub context: String,
    pub text: String,
}

const BASE_PROMPT: &str = "You are reviewing a Terms of Service document on behalf of an \
end user. Identify clauses the user should be aware of: data collection, sharing with \
third parties, liability waivers, arbitration, termination, and billing. Respond with \
ONLY a JSON object of the form {\"summary\": \"...\", \"highlights\": [\"...\"]}, where \
each highlight quotes one notable clause verbatim from the document.";

fn build_context(category: Option<&Category>, index: usize, total: usize) -> String {
    let mut context = BASE_PROMPT.to_string();

    if let Some(category) = category {
        context.push_str(&format!(
            "\n\nFocus exclusively on {}. Ignore clauses outside that topic.",
            category.focus
        ));
    }

    if total > 1 {
        context.push_str(&format!(
            "\n\nThis is part {}/{} of the document. Analyze this part on its own; \
             do not ask for the remaining parts.",
            index + 1,
            total
        ));
    }

    context
}

/// Plan one task per independent unit of remote work. With no categories
/// configured, the fan-out unit is the chunk; with categories, it is the
/// (category, chunk) pair, labeled by category and ordered category-major
/// so each category's results stay contiguous downstream.
pub fn plan_tasks(chunks: &[Chunk], categories: &[Category]) -> Vec<AnalysisTask> {
    if categories.is_empty() {
        return chunks
            .iter()
            .map(|chunk| AnalysisTask {
                label: TaskLabel::Chunk {
                    index: chunk.index,
                    total: chunk.total,
                },
                context: build_context(None, chunk.index, chunk.total),
                text: chunk.text.clone(),
            })
            .collect();
    }

    let mut tasks = Vec::with_capacity(categories.len() * chunks.len());
    for category in categories {
        for chunk in chunks {
            tasks.push(AnalysisTask {
                label: TaskLabel::Category {
                    name: category.name.clone(),
                },
                context: build_context(Some(category), chunk.index, chunk.total),
                text: chunk.text.clone(),
            });
        }
    }
    tasks
}
