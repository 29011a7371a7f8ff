use crate::core::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 本機檔案系統；輸出寫到 `base_path` 之下
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

fn is_text_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("txt")
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let data = fs::read(path).await?;
        Ok(data)
    }

    async fn write_file(&self, name: &str, data: &[u8]) -> Result<PathBuf> {
        let full_path = Path::new(&self.base_path).join(name);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&full_path, data).await?;
        Ok(full_path)
    }

    async fn list_text_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let metadata = fs::metadata(path).await?;
        if !metadata.is_dir() {
            return Ok(vec![path.to_path_buf()]);
        }

        let mut files = Vec::new();
        let mut entries = fs::read_dir(path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let entry_path = entry.path();
            if entry.file_type().await?.is_file() && is_text_file(&entry_path) {
                files.push(entry_path);
            }
        }
        files.sort();

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_text_files_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("杜甫诗选.txt"), "《春望》\n国破山河在\n").unwrap();
        std::fs::write(dir.path().join("李白诗选.txt"), "《静夜思》\n床前明月光\n").unwrap();
        std::fs::write(dir.path().join("notes.md"), "# notes").unwrap();
        std::fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let storage = LocalStorage::new(dir.path().display().to_string());
        let files = storage.list_text_files(dir.path()).await.unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        let mut expected = vec!["杜甫诗选.txt".to_string(), "李白诗选.txt".to_string()];
        expected.sort();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_single_file_lists_itself() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("poems.md");
        std::fs::write(&file, "《春晓》\n春眠不觉晓\n").unwrap();

        let storage = LocalStorage::new(dir.path().display().to_string());
        assert_eq!(storage.list_text_files(&file).await.unwrap(), vec![file]);
    }

    #[tokio::test]
    async fn test_write_file_creates_output_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");

        let storage = LocalStorage::new(out.display().to_string());
        let written = storage.write_file("poems.json", b"{}").await.unwrap();

        assert_eq!(written, out.join("poems.json"));
        assert_eq!(std::fs::read(written).unwrap(), b"{}");
    }

    #[tokio::test]
    async fn test_missing_input_is_io_error() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().display().to_string());
        let result = storage.list_text_files(&dir.path().join("missing")).await;
        assert!(matches!(result, Err(crate::utils::error::PoemError::IoError(_))));
    }
}
