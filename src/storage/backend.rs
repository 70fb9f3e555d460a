//! Raw text storage behind the employee store.
//!
//! A backend only knows how to check, read and overwrite one blob of text.
//! Choosing between backends is the job of [`super::locator::ReadPolicy`]
//! and [`super::gateway::EmployeeStore`].

use std::fs;
use std::io;
use std::path::PathBuf;

pub trait Backend: Send + Sync {
    fn exists(&self) -> bool;

    fn read_to_string(&self) -> io::Result<String>;

    /// Replaces the whole blob. Partial writes are not modelled.
    fn write_str(&self, contents: &str) -> io::Result<()>;

    /// Human-readable name used in log lines.
    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileBackend { path: path.into() }
    }
}

impl Backend for FileBackend {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read_to_string(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }

    fn write_str(&self, contents: &str) -> io::Result<()> {
        fs::write(&self.path, contents)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
