use std::{
    fmt,
    path::{Path, PathBuf},
};

/// A position inside a source file.
///
/// Lines are 1-based, columns are the 0-based character offset within the
/// line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self { line: 1, column: 0 }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}:{}", self.line, self.column)
    }
}

/// A source file loaded once per invocation.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    path: PathBuf,
    text: String,
}

impl SourceUnit {
    /// Load a source file from disk.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let text = std::fs::read_to_string(&path)?;
        Ok(Self { path, text })
    }

    /// Create a unit from in-memory text.
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Name used in diagnostics.
    pub fn name(&self) -> String {
        self.path.display().to_string()
    }

    /// A cursor positioned at the start of the text.
    pub fn cursor(&self) -> SourceCursor<'_> {
        SourceCursor::new(&self.text)
    }
}

/// A character cursor over source text that can be moved back.
///
/// The cursor tracks line and column as it advances so that parsers can
/// attach a [`Location`] to every token. Seeking recomputes the position
/// from the start of the text.
#[derive(Debug, Clone)]
pub struct SourceCursor<'a> {
    text: &'a str,
    offset: usize,
    location: Location,
}

impl<'a> SourceCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            location: Location::default(),
        }
    }

    /// Byte offset of the next character.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Location of the next character.
    pub fn location(&self) -> Location {
        self.location
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.text.len()
    }

    /// Unconsumed text.
    pub fn rest(&self) -> &'a str {
        &self.text[self.offset..]
    }

    /// Text between two byte offsets.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[start..end]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Look `n` characters ahead without consuming (`peek_nth(0) == peek()`).
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// Consume one character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.location.line += 1;
            self.location.column = 0;
        } else {
            self.location.column += 1;
        }
        Some(c)
    }

    /// Consume characters while `pred` holds.
    pub fn bump_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
    }

    /// Move to a byte offset, clamped to the text length and snapped back to
    /// a character boundary.
    pub fn seek(&mut self, offset: usize) {
        let mut target = offset.min(self.text.len());
        while !self.text.is_char_boundary(target) {
            target -= 1;
        }

        self.offset = 0;
        self.location = Location::default();
        while self.offset < target {
            self.bump();
        }
    }

    /// Move back to the start of the text.
    pub fn rewind(&mut self) {
        self.seek(0);
    }
}
