//! Column access for IGC lines
//!
//! IGC columns count single-byte characters. Latin-1 input decoded to a
//! `String` turns every byte above 0x7F into a two-byte UTF-8 sequence, so
//! columns are resolved by character position rather than byte offset.

/// Byte offset of the character at `position`; one past the last character maps to `line.len()`
fn byte_offset(line: &str, position: usize) -> Option<usize> {
    line.char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(line.len()))
        .nth(position)
}

/// Characters `start..end` of `line`, `None` if the line is too short
pub fn char_slice(line: &str, start: usize, end: usize) -> Option<&str> {
    let from = byte_offset(line, start)?;
    let to = byte_offset(line, end)?;
    line.get(from..to)
}

/// Characters from `start` to the end of `line`, `None` if the line is too short
pub fn char_slice_from(line: &str, start: usize) -> Option<&str> {
    line.get(byte_offset(line, start)?..)
}

/// Number of characters (IGC columns) in `line`
pub fn char_len(line: &str) -> usize {
    line.chars().count()
}
