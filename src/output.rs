/// Line buffer the printer writes into.
///
/// Tokens are appended to the current line; the indent is inserted lazily
/// when the first token lands on a fresh line, so blank lines never carry
/// trailing whitespace.
pub struct Output {
    lines: Vec<String>,
    current_line: String,
    indent_level: usize,
    indent_string: String,
    at_line_start: bool,
}

impl Output {
    pub fn new(indent_string: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            current_line: String::new(),
            indent_level: 0,
            indent_string: indent_string.into(),
            at_line_start: true,
        }
    }

    pub fn add_token(&mut self, text: &str) {
        if self.at_line_start && !text.is_empty() {
            self.current_line.push_str(&self.get_indent());
            self.at_line_start = false;
        }
        self.current_line.push_str(text);
    }

    /// Appends text that may span lines verbatim, such as template literal
    /// chunks. Continuation lines are not indented.
    pub fn add_template_literal(&mut self, text: &str) {
        let mut lines_iter = text.split('\n');

        if let Some(first_line) = lines_iter.next() {
            self.add_token(first_line);
        }

        for line in lines_iter {
            self.lines.push(std::mem::take(&mut self.current_line));
            self.current_line.push_str(line);
            self.at_line_start = false;
        }
    }

    pub fn add_space(&mut self) {
        if !self.current_line.is_empty() && !self.current_line.ends_with(' ') {
            self.current_line.push(' ');
        }
    }

    pub fn add_newline(&mut self) {
        if !self.current_line.is_empty() {
            self.lines.push(std::mem::take(&mut self.current_line));
        }
        self.at_line_start = true;
    }

    pub const fn add_indent(&mut self) {
        self.indent_level += 1;
    }

    pub const fn remove_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn get_indent(&self) -> String {
        self.indent_string.repeat(self.indent_level)
    }

    /// Finished text, terminated by a newline unless empty.
    pub fn finish(mut self) -> String {
        self.add_newline();
        let mut result = self.lines.join("\n");
        if !result.is_empty() {
            result.push('\n');
        }
        result
    }
}
