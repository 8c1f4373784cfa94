use std::{fmt, rc::Rc};

/// A named piece of Sympl source text.
///
/// Every token and AST node keeps a shared handle to the file it was read
/// from, so errors raised long after parsing can still print the offending
/// line.
#[derive(Debug, PartialEq, Eq)]
pub struct SourceFile {
    /// The name shown in tracebacks, usually the path the script was loaded
    /// from or `<stdin>`.
    pub name: String,
    /// The full source text.
    pub text: String,
}

impl SourceFile {
    /// Creates a new shared source file.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Rc<Self> {
        Rc::new(Self { name: name.into(),
                       text: text.into(), })
    }

    /// Returns the text of the given 1-based line without its line ending.
    pub fn line_text(&self, line: usize) -> Option<&str> {
        self.text
            .split('\n')
            .nth(line.checked_sub(1)?)
            .map(|text| text.strip_suffix('\r').unwrap_or(text))
    }
}

/// A location inside a source file.
///
/// `index` is a byte offset into the text. `line` and `column` are 1-based and
/// count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Byte offset into the source text.
    pub index:  usize,
    /// 1-based line number.
    pub line:   usize,
    /// 1-based column number.
    pub column: usize,
}

impl Position {
    /// The position of the first character of any file.
    #[must_use]
    pub const fn start() -> Self {
        Self { index:  0,
               line:   1,
               column: 1, }
    }

    /// Moves past a single character.
    ///
    /// A newline moves to the first column of the next line.
    pub fn advance(&mut self, character: char) {
        self.index += character.len_utf8();
        if character == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Moves forward character by character until `index` is reached.
    ///
    /// Targets behind the current position are ignored.
    pub fn advance_to(&mut self, text: &str, index: usize) {
        if index <= self.index {
            return;
        }
        if let Some(skipped) = text.get(self.index..index) {
            for character in skipped.chars() {
                self.advance(character);
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

/// A range of source text, from `start` (inclusive) to `end` (exclusive).
#[derive(Clone)]
pub struct Span {
    /// The file the range belongs to.
    pub source: Rc<SourceFile>,
    /// First position covered by the span.
    pub start:  Position,
    /// Position just past the last covered character.
    pub end:    Position,
}

impl Span {
    /// Creates a span covering `start..end` in `source`.
    #[must_use]
    pub fn new(source: Rc<SourceFile>, start: Position, end: Position) -> Self {
        Self { source, start, end }
    }

    /// Returns a span that starts where `self` starts and ends where `other`
    /// ends.
    ///
    /// Composite AST nodes use this to cover their first and last child.
    #[must_use]
    pub fn to(&self, other: &Self) -> Self {
        Self { source: Rc::clone(&self.source),
               start:  self.start,
               end:    other.end, }
    }

    /// The 1-based line the span starts on.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.start.line
    }

    /// The name of the file the span belongs to.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.source.name
    }

    /// The source text covered by the span.
    #[must_use]
    pub fn text(&self) -> &str {
        self.source
            .text
            .get(self.start.index..self.end.index)
            .unwrap_or_default()
    }

    /// Renders the lines covered by the span with `^` markers under the
    /// covered characters.
    ///
    /// # Example
    /// ```
    /// use sympl::source::{Position, SourceFile, Span};
    ///
    /// let file = SourceFile::new("<test>", "var x = 1 / 0");
    /// let mut start = Position::start();
    /// start.advance_to(&file.text, 8);
    /// let mut end = start;
    /// end.advance_to(&file.text, 13);
    ///
    /// let span = Span::new(file, start, end);
    /// assert_eq!(span.underline(), "var x = 1 / 0\n        ^^^^^");
    /// ```
    #[must_use]
    pub fn underline(&self) -> String {
        let mut rendered = Vec::new();
        for line in self.start.line..=self.end.line.max(self.start.line) {
            let Some(text) = self.source.line_text(line) else {
                break;
            };
            let width = text.chars().count();
            let from = if line == self.start.line { self.start.column } else { 1 };
            let to = if line == self.end.line { self.end.column } else { width + 1 };
            let markers = to.saturating_sub(from).max(1);

            rendered.push(text.to_string());
            rendered.push(format!("{}{}", " ".repeat(from - 1), "^".repeat(markers)));
        }
        rendered.join("\n")
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.source, &other.source) && self.start == other.start && self.end == other.end
    }
}

impl Eq for Span {}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "{}:{}:{}..{}:{}",
               self.source.name, self.start.line, self.start.column, self.end.line, self.end.column)
    }
}

/// Formats the span the way error headers print it: `Line L (C1, C2)`.
impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {} ({}, {})", self.start.line, self.start.column, self.end.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_of(file: &Rc<SourceFile>, from: usize, to: usize) -> Span {
        let mut start = Position::start();
        start.advance_to(&file.text, from);
        let mut end = start;
        end.advance_to(&file.text, to);
        Span::new(Rc::clone(file), start, end)
    }

    #[test]
    fn advance_tracks_lines_and_columns() {
        let mut position = Position::start();
        for character in "ab\ncd".chars() {
            position.advance(character);
        }
        assert_eq!(position,
                   Position { index:  5,
                              line:   2,
                              column: 3, });
    }

    #[test]
    fn display_uses_line_and_columns() {
        let file = SourceFile::new("<test>", "1 +\nfoo bar");
        let span = span_of(&file, 8, 11);
        assert_eq!(span.to_string(), "Line 2 (5, 8)");
        assert_eq!(span.text(), "bar");
    }

    #[test]
    fn merged_span_covers_both_ends() {
        let file = SourceFile::new("<test>", "left + right");
        let left = span_of(&file, 0, 4);
        let right = span_of(&file, 7, 12);
        assert_eq!(left.to(&right).text(), "left + right");
    }

    #[test]
    fn underline_spans_multiple_lines() {
        let file = SourceFile::new("<test>", "ab\ncdef");
        let span = span_of(&file, 1, 5);
        assert_eq!(span.underline(), "ab\n ^\ncdef\n^^");
    }
}
