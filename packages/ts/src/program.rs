/// A source file handed to the analyzer by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub file_name: String,
    pub text: String,
    /// Resolved file names of the modules this file imports directly.
    pub imports: Vec<String>,
}

impl SourceFile {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
            imports: Vec::new(),
        }
    }

    pub fn with_imports(mut self, imports: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Zero-based line and character (in chars) of a byte offset.
    pub fn line_and_character_of_position(&self, position: usize) -> (usize, usize) {
        let position = position.min(self.text.len());
        let before = &self.text[..floor_char_boundary(&self.text, position)];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let character = before[line_start..].chars().count();
        (line, character)
    }
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Read-only access to the files of the host program.
pub trait Program {
    fn get_source_file(&self, file_name: &str) -> Option<&SourceFile>;
    fn source_files(&self) -> Vec<&SourceFile>;
}
