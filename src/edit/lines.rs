//! Line view over file content with byte offsets back into the original.
//!
//! Lines are split on `\n`. A `\r` immediately before the `\n` belongs to the
//! terminator, so CRLF files compare the same as LF files while spans still
//! cover the on-disk bytes verbatim.

/// Lines of `content` plus the byte offset at which each one starts.
#[derive(Debug)]
pub struct LineIndex<'a> {
    content: &'a str,
    lines: Vec<&'a str>,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(content: &'a str) -> Self {
        let mut lines = Vec::new();
        let mut starts = Vec::new();
        let mut offset = 0;

        for raw in content.split('\n') {
            starts.push(offset);
            offset += raw.len() + 1;
            lines.push(raw.strip_suffix('\r').unwrap_or(raw));
        }

        Self {
            content,
            lines,
            starts,
        }
    }

    /// Line texts without their terminators.
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Verbatim span of `content` covering lines `start..=end`.
    ///
    /// Interior terminators are included; the terminator of the last line is not.
    pub fn block(&self, start: usize, end: usize) -> &'a str {
        let from = self.starts[start];
        let to = self.starts[end] + self.lines[end].len();
        &self.content[from..to]
    }
}

/// Split a search pattern into lines, dropping one trailing empty entry
/// left behind by a final line terminator.
pub fn pattern_lines(pattern: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = pattern
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}
