use crate::error::ConfigError;

/// One bounded, ordered slice of the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub total: usize,
    pub text: String,
}

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Split a document into ordered chunks of at most `max_chars` characters,
/// preferring to cut at sentence terminators so a sentence is never split
/// across chunks when avoidable. Concatenating the chunk texts in order
/// reproduces the input exactly.
pub fn split(text: &str, max_chars: usize) -> Result<Vec<Chunk>, ConfigError> {
    if max_chars == 0 {
        return Err(ConfigError::ZeroChunkSize);
    }

    let mut pieces: Vec<&str> = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        // Byte offset of the window end: at most max_chars characters.
        let window = match rest.char_indices().nth(max_chars) {
            Some((byte_end, _)) => byte_end,
            None => rest.len(),
        };

        let cut = if window == rest.len() {
            window
        } else {
            match rest[..window].rfind(SENTENCE_TERMINATORS) {
                // Terminator strictly after the window start: cut there,
                // inclusive. One at offset 0 cannot shrink the window.
                Some(pos) if pos > 0 => pos + 1,
                // No terminator: a sentence longer than max_chars is
                // emitted whole-window, not split further.
                _ => window,
            }
        };

        pieces.push(&rest[..cut]);
        rest = &rest[cut..];
    }

    let total = pieces.len();
    Ok(pieces
        .into_iter()
        .enumerate()
        .map(|(index, text)| Chunk {
            index,
            total,
            text: text.to_string(),
        })
        .collect())
}
