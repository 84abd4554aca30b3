/// Output buffer plus the current indentation depth. Passed by `&mut`
/// through every emission step.
#[derive(Debug)]
pub struct Emitter {
    output: String,
    indent_unit: String,
    depth: usize,
}

impl Emitter {
    pub fn new(indent_width: usize) -> Self {
        Self {
            output: String::new(),
            indent_unit: " ".repeat(indent_width),
            depth: 0,
        }
    }

    /// Appends `text` as-is, without indentation or a trailing newline.
    pub fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// Appends one line at the current depth.
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.output.push_str(&self.indent_unit);
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    pub fn blank_line(&mut self) {
        self.output.push('\n');
    }

    /// Runs `body` one level deeper and restores the depth afterwards.
    pub fn indented<F>(&mut self, body: F)
    where
        F: FnOnce(&mut Self),
    {
        self.depth += 1;
        body(self);
        self.depth -= 1;
    }

    pub fn output_len(&self) -> usize {
        self.output.len()
    }

    pub fn finish(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_indentation() {
        let mut emitter = Emitter::new(2);
        emitter.line("a {");
        emitter.indented(|e| {
            e.line("b;");
            e.indented(|e| e.line("c;"));
            e.line("d;");
        });
        emitter.line("}");
        assert_eq!(emitter.finish(), "a {\n  b;\n    c;\n  d;\n}\n");
    }

    #[test]
    fn test_write_skips_indentation() {
        let mut emitter = Emitter::new(4);
        emitter.indented(|e| e.write("raw"));
        emitter.blank_line();
        assert_eq!(emitter.output_len(), 4);
        assert_eq!(emitter.finish(), "raw\n");
    }
}
