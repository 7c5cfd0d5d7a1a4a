use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use super::mock_server::FAKE_WAV;

/// Local files to upload, created in a temporary directory.
pub struct TestFixtures {
    dir: TempDir,
}

impl TestFixtures {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// A small WAV file named `name`.
    pub fn wav(&self, name: &str) -> Result<PathBuf> {
        self.write(name, FAKE_WAV)
    }

    /// A file of `size` bytes that starts with a WAV header.
    pub fn sized_wav(&self, name: &str, size: u64) -> Result<PathBuf> {
        let path = self.wav(name)?;
        std::fs::OpenOptions::new().write(true).open(&path)?.set_len(size)?;
        Ok(path)
    }

    pub fn text(&self, name: &str, content: &str) -> Result<PathBuf> {
        self.write(name, content.as_bytes())
    }

    pub fn write(&self, name: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }
}
