//! Splitting helpers for the dump's positional text.
//!
//! Columns are measured in characters, not bytes: stop and street names
//! carry Polish diacritics and a byte split would land mid-character.

/// Split `line` into columns of the given widths followed by the remainder.
///
/// Every column is trimmed. A line shorter than the layout yields empty
/// columns rather than failing, so the result always has
/// `widths.len() + 1` entries.
pub fn split_columns<'a>(line: &'a str, widths: &[usize]) -> Vec<&'a str> {
    let mut columns = Vec::with_capacity(widths.len() + 1);
    let mut rest = line;

    for &width in widths {
        let split_at = rest
            .char_indices()
            .nth(width)
            .map_or(rest.len(), |(idx, _)| idx);
        let (column, tail) = rest.split_at(split_at);
        columns.push(column.trim());
        rest = tail;
    }

    columns.push(rest.trim());
    columns
}

/// Strip a single trailing `delimiter` (and the whitespace before it).
pub fn strip_trailing_delimiter(s: &str, delimiter: char) -> &str {
    s.strip_suffix(delimiter).map_or(s, str::trim_end)
}

/// Lines of a block with blank lines dropped. Line contents are untouched.
pub fn block_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| !line.trim().is_empty())
}

/// Parse the leading run of ASCII digits.
///
/// Returns `None` when `s` does not start with a digit or the run does not
/// fit in a `u32`. Anything after the digits is ignored.
pub fn leading_number(s: &str) -> Option<u32> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}
