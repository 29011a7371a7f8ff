use crate::core::Pipeline;
use crate::utils::error::{PoemError, Result};

pub struct IndexEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> IndexEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 回傳寫出的索引檔路徑；有任何檔案驗證失敗時不寫出任何東西
    pub async fn run(&self) -> Result<Vec<String>> {
        tracing::info!("Starting poem index run");

        // Extract
        let files = self.pipeline.extract().await?;
        tracing::info!("Read {} file(s)", files.len());

        // Transform
        let result = self.pipeline.transform(files).await?;
        tracing::info!(
            "Parsed {} poem(s) from {} file(s), {} file(s) failed",
            result.poem_count(),
            result.files.len(),
            result.failures.len()
        );

        if !result.failures.is_empty() {
            for failure in &result.failures {
                tracing::error!("{}", failure);
            }
            return Err(PoemError::InvalidFiles {
                failures: result.failures,
            });
        }

        // Load
        let outputs = self.pipeline.load(result).await?;
        for output in &outputs {
            tracing::info!("Index written to: {}", output);
        }

        Ok(outputs)
    }
}
