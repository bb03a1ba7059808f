//! Greedy word-packing segmentation of source lines into publishable chunks.

/// Split `input` into an ordered sequence of chunks, each at most `limit`
/// characters, without breaking words.
///
/// Words are whitespace-separated. A chunk keeps absorbing the next word
/// while the chunk, a separating space, and that word together stay within
/// `limit`; otherwise the chunk closes and the word starts a new one.
/// Joining the chunks with single spaces reproduces the original word
/// sequence. Lengths are Unicode scalar counts, not bytes.
///
/// A single word longer than `limit` is emitted alone as an oversized chunk
/// rather than being truncated or split mid-word.
///
/// Deterministic, no side effects. A whitespace-only input produces an empty
/// sequence; any input containing at least one word produces at least one
/// chunk.
pub fn segment(input: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in input.split_whitespace() {
        let word_chars = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            current_chars = word_chars;
        } else if current_chars + 1 + word_chars > limit {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_chars = word_chars;
        } else {
            current.push(' ');
            current.push_str(word);
            current_chars += 1 + word_chars;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
