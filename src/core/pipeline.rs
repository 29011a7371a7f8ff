use crate::core::parser::PoemFileParser;
use crate::core::{ConfigProvider, IndexResult, Pipeline, Storage};
use crate::domain::model::{poet_from_filename, ExtractedFile, IndexedFile, PoemIndex};
use crate::utils::error::{FileFailure, PoemError, Result};
use std::path::Path;

pub const JSON_OUTPUT: &str = "poems.json";
pub const CSV_OUTPUT: &str = "poems.csv";

pub struct PoemPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> PoemPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn index_file(file: ExtractedFile) -> std::result::Result<IndexedFile, FileFailure> {
        let text = String::from_utf8(file.bytes).map_err(|e| FileFailure {
            file: file.file.clone(),
            line: None,
            message: format!("not valid UTF-8: {}", e),
        })?;

        let poems = PoemFileParser::new(&text)
            .parse()
            .map_err(|e| FileFailure::from_format(file.file.clone(), &e))?;

        let poet = Path::new(&file.file)
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(poet_from_filename);

        Ok(IndexedFile {
            file: file.file,
            poet,
            poems,
        })
    }
}

/// 每首詩一列：file,poet,title,line_count,char_count
pub fn render_csv(files: &[IndexedFile]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["file", "poet", "title", "line_count", "char_count"])?;

    for file in files {
        let poet = file.poet.as_deref().unwrap_or("");
        for poem in &file.poems {
            let line_count = poem.lines.len().to_string();
            let char_count = poem.char_count().to_string();
            writer.write_record([
                file.file.as_str(),
                poet,
                poem.title.as_str(),
                line_count.as_str(),
                char_count.as_str(),
            ])?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| PoemError::IoError(e.into_error()))
}

pub fn render_json(files: Vec<IndexedFile>) -> Result<Vec<u8>> {
    let index = PoemIndex {
        generated_at: chrono::Utc::now(),
        files,
    };
    Ok(serde_json::to_vec_pretty(&index)?)
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PoemPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<ExtractedFile>> {
        let mut files = Vec::new();

        for input in self.config.inputs() {
            let paths = self.storage.list_text_files(Path::new(input)).await?;
            if paths.is_empty() {
                tracing::warn!("No .txt files found under {}", input);
            }

            for path in paths {
                tracing::debug!("Reading {}", path.display());
                let bytes = self.storage.read_file(&path).await?;
                files.push(ExtractedFile {
                    file: path.display().to_string(),
                    bytes,
                });
            }
        }

        Ok(files)
    }

    async fn transform(&self, files: Vec<ExtractedFile>) -> Result<IndexResult> {
        let mut result = IndexResult::default();

        for file in files {
            match Self::index_file(file) {
                Ok(indexed) => {
                    tracing::debug!(
                        "{}: {} poem(s), poet {:?}",
                        indexed.file,
                        indexed.poems.len(),
                        indexed.poet
                    );
                    result.files.push(indexed);
                }
                Err(failure) => {
                    tracing::debug!("Validation failed: {}", failure);
                    result.failures.push(failure);
                }
            }
        }

        Ok(result)
    }

    async fn load(&self, result: IndexResult) -> Result<Vec<String>> {
        if self.config.check_only() {
            tracing::info!("Check-only mode, no index written");
            return Ok(Vec::new());
        }

        let mut outputs = Vec::new();
        for format in self.config.output_formats() {
            let (name, data) = match format.as_str() {
                "json" => (JSON_OUTPUT, render_json(result.files.clone())?),
                "csv" => (CSV_OUTPUT, render_csv(&result.files)?),
                other => {
                    return Err(PoemError::InvalidConfigValueError {
                        field: "output_formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported format. Valid formats: json, csv".to_string(),
                    })
                }
            };

            tracing::debug!("Writing {} ({} bytes)", name, data.len());
            let path = self.storage.write_file(name, &data).await?;
            outputs.push(path.display().to_string());
        }

        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PoemCollection, PoemRecord};

    fn sample_files() -> Vec<IndexedFile> {
        vec![IndexedFile {
            file: "李白诗选.txt".to_string(),
            poet: Some("李白".to_string()),
            poems: PoemCollection::new(vec![PoemRecord::new(
                "静夜思",
                vec!["床前明月光，".to_string(), "疑是地上霜。".to_string()],
            )]),
        }]
    }

    #[test]
    fn test_render_csv() {
        let csv = String::from_utf8(render_csv(&sample_files()).unwrap()).unwrap();
        let mut rows = csv.lines();
        assert_eq!(rows.next(), Some("file,poet,title,line_count,char_count"));
        assert_eq!(rows.next(), Some("李白诗选.txt,李白,静夜思,2,12"));
        assert_eq!(rows.next(), None);
    }

    #[test]
    fn test_render_json() {
        let json = render_json(sample_files()).unwrap();
        let index: PoemIndex = serde_json::from_slice(&json).unwrap();
        assert_eq!(index.files, sample_files());
    }
}
