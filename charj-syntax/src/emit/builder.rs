//! Indented text builder shared by the emitters.

/// One indent level in both artifacts.
const INDENT: &str = "    ";

/// Builds code line by line at the current indentation.
///
/// ```
/// use charj_syntax::emit::CodeBuilder;
///
/// let code = CodeBuilder::standard()
///     .block("module demo {", "};", |b| b.line("chare Main;"))
///     .build();
///
/// assert_eq!(code, "module demo {\n    chare Main;\n};\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    level: usize,
    buffer: String,
}

impl CodeBuilder {
    pub fn standard() -> Self {
        Self {
            level: 0,
            buffer: String::new(),
        }
    }

    /// Add a line at the current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    /// Add an empty line.
    pub fn blank(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    pub fn indent(mut self) -> Self {
        self.level += 1;
        self
    }

    pub fn dedent(mut self) -> Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// `header`, then the indented body, then `close`.
    pub fn block<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        f(self.line(header).indent()).dedent().line(close)
    }

    /// Add every line of `text`, each at the current indentation.
    pub fn lines<'s>(mut self, text: impl IntoIterator<Item = &'s str>) -> Self {
        for l in text {
            if l.is_empty() {
                self.buffer.push('\n');
            } else {
                self.push_line(l);
            }
        }
        self
    }

    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    pub fn build(self) -> String {
        self.buffer
    }

    fn push_line(&mut self, s: &str) {
        for _ in 0..self.level {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_blocks() {
        let code = CodeBuilder::standard()
            .block("a {", "}", |b| b.block("b {", "}", |b| b.line("c;")))
            .build();
        assert_eq!(code, "a {\n    b {\n        c;\n    }\n}\n");
    }

    #[test]
    fn test_lines_keep_blank_lines_unindented() {
        let code = CodeBuilder::standard()
            .indent()
            .lines(["x = 1;", "", "y = 2;"])
            .build();
        assert_eq!(code, "    x = 1;\n\n    y = 2;\n");
    }

    #[test]
    fn test_when_and_each() {
        let code = CodeBuilder::standard()
            .when(false, |b| b.line("skipped"))
            .each(["a", "b"], |b, s| b.line(s))
            .build();
        assert_eq!(code, "a\nb\n");
    }
}
