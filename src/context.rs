//! Session context
//!
//! The supplier and file list the editor was opened with. Passed explicitly to
//! the session and its collaborators; nothing here is global.

/// Who the open files belong to and which extracted file is shown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// Supplier code used to build canonical remote paths
    pub supplier: Option<String>,
    /// Remote paths of the files extracted from the current container
    pub extracted_files: Vec<String>,
    /// Index into `extracted_files` of the open file
    pub current_file: Option<usize>,
}

impl SessionContext {
    pub fn new(supplier: Option<String>) -> Self {
        Self {
            supplier,
            ..Self::default()
        }
    }

    pub fn with_extracted_files(mut self, files: Vec<String>) -> Self {
        self.extracted_files = files;
        self.current_file = None;
        self
    }

    pub fn supplier(&self) -> Option<&str> {
        self.supplier.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Remote path of the extracted file at `index`
    pub fn extracted_file(&self, index: usize) -> Option<&str> {
        self.extracted_files.get(index).map(String::as_str)
    }

    /// Path of the file currently open, if it came from the extracted list
    pub fn current_path(&self) -> Option<&str> {
        self.current_file.and_then(|idx| self.extracted_file(idx))
    }

    /// Display label for an extracted file, numbered from 1
    pub fn container_label(index: usize) -> String {
        format!("Container {}", index + 1)
    }
}
