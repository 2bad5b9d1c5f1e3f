use crate::core::ArtifactSink;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Saves artifacts as files under a base directory, creating it when missing.
#[derive(Debug, Clone)]
pub struct FileSink {
    base_path: PathBuf,
}

impl FileSink {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl ArtifactSink for FileSink {
    async fn write(&self, name: &str, content: &[u8]) -> Result<String> {
        let full_path = self.base_path.join(name);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, content).await?;
        Ok(full_path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let sink = FileSink::new(temp_dir.path().join("exports"));

        let location = sink.write("listed.json", b"{\"domains\": [\n]}\n").await.unwrap();

        let expected = temp_dir.path().join("exports").join("listed.json");
        assert_eq!(location, expected.display().to_string());
        assert_eq!(
            std::fs::read_to_string(expected).unwrap(),
            "{\"domains\": [\n]}\n"
        );
    }

    #[tokio::test]
    async fn test_write_overwrites_previous_export() {
        let temp_dir = TempDir::new().unwrap();
        let sink = FileSink::new(temp_dir.path());

        sink.write("listed.json", b"old").await.unwrap();
        sink.write("listed.json", b"new").await.unwrap();

        let saved = std::fs::read_to_string(temp_dir.path().join("listed.json")).unwrap();
        assert_eq!(saved, "new");
    }
}
