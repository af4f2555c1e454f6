use std::path::PathBuf;

use catalyst_graph::io::Format;

#[derive(Debug, Clone)]
pub struct OutputSpec {
    /// Path to write to, or `None` for stdout.
    pub path: Option<PathBuf>,
    /// Graph serialization.
    pub format: Format,
}

impl OutputSpec {
    pub fn describe(&self) -> String {
        match &self.path {
            Some(path) => format!("{} → {}", self.format, path.display()),
            None => format!("{} → stdout", self.format),
        }
    }
}
