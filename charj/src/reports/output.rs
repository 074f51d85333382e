//! Output trait for rendering reports to different formats.

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods.
/// Implementations decide *how* to render.
pub trait Output {
    /// Start a new section with a heading.
    fn section(&mut self, name: &str);

    /// Render a key-value pair.
    fn key_value(&mut self, key: &str, value: &str);

    /// Render an added item (e.g., new file).
    fn added_item(&mut self, text: &str);

    /// Render a removed item (e.g., deleted directory).
    fn removed_item(&mut self, text: &str);

    /// Render a block of preformatted text exactly as given.
    fn preformatted(&mut self, text: &str);

    /// Render a plain line of text.
    fn line(&mut self, text: &str);
}

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output);
}

/// Terminal output implementation.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn section(&mut self, name: &str) {
        println!("{}:", name);
    }

    fn key_value(&mut self, key: &str, value: &str) {
        println!("{}: {}", key, value);
    }

    fn added_item(&mut self, text: &str) {
        println!("  + {}", text);
    }

    fn removed_item(&mut self, text: &str) {
        println!("  - {}", text);
    }

    fn preformatted(&mut self, text: &str) {
        print!("{}", text);
    }

    fn line(&mut self, text: &str) {
        println!("{}", text);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Output;

    /// Collects rendered output as text.
    #[derive(Default)]
    pub struct TextOutput(pub String);

    impl Output for TextOutput {
        fn section(&mut self, name: &str) {
            self.0.push_str(&format!("{}:\n", name));
        }

        fn key_value(&mut self, key: &str, value: &str) {
            self.0.push_str(&format!("{}: {}\n", key, value));
        }

        fn added_item(&mut self, text: &str) {
            self.0.push_str(&format!("  + {}\n", text));
        }

        fn removed_item(&mut self, text: &str) {
            self.0.push_str(&format!("  - {}\n", text));
        }

        fn preformatted(&mut self, text: &str) {
            self.0.push_str(text);
        }

        fn line(&mut self, text: &str) {
            self.0.push_str(text);
            self.0.push('\n');
        }
    }
}
