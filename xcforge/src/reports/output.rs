//! Output trait for rendering reports to different formats.

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods.
/// Implementations decide *how* to render.
pub trait Output {
    /// Start a new section with a heading.
    fn section(&mut self, name: &str);

    /// Render an indented key-value pair.
    fn key_value(&mut self, key: &str, value: &str);

    /// Render a numbered list item.
    fn numbered_item(&mut self, index: usize, text: &str);

    /// Render a bullet list item.
    fn list_item(&mut self, text: &str);

    /// Render a block of preformatted text.
    fn preformatted(&mut self, text: &str);

    /// Render a blank line.
    fn newline(&mut self);
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
        println!("  {}", name);
        println!("  {}", "─".repeat(name.chars().count()));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        println!("  {:<12}{}", key, value);
    }

    fn numbered_item(&mut self, index: usize, text: &str) {
        println!("  {}. {}", index, text);
    }

    fn list_item(&mut self, text: &str) {
        println!("  - {}", text);
    }

    fn preformatted(&mut self, text: &str) {
        println!("{}", text);
    }

    fn newline(&mut self) {
        println!();
    }
}

/// Output collected into a string, for tests.
#[cfg(test)]
#[derive(Default)]
pub struct StringOutput(pub String);

#[cfg(test)]
impl Output for StringOutput {
    fn section(&mut self, name: &str) {
        self.0.push_str(&format!("[{}]\n", name));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.0.push_str(&format!("{}: {}\n", key, value));
    }

    fn numbered_item(&mut self, index: usize, text: &str) {
        self.0.push_str(&format!("{}. {}\n", index, text));
    }

    fn list_item(&mut self, text: &str) {
        self.0.push_str(&format!("- {}\n", text));
    }

    fn preformatted(&mut self, text: &str) {
        self.0.push_str(text);
        self.0.push('\n');
    }

    fn newline(&mut self) {
        self.0.push('\n');
    }
}
