use crate::domain::model::{ExtractedFile, IndexResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    /// 讀取輸入檔案的原始位元組 (路徑照原樣使用)
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;

    /// 寫入輸出目錄下的 `name`，回傳完整路徑
    fn write_file(
        &self,
        name: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<PathBuf>> + Send;

    /// 檔案回傳自身；目錄回傳其中的 `*.txt`，依檔名排序，不遞迴
    fn list_text_files(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<Vec<PathBuf>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn inputs(&self) -> &[String];
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn check_only(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<ExtractedFile>>;
    async fn transform(&self, files: Vec<ExtractedFile>) -> Result<IndexResult>;
    async fn load(&self, result: IndexResult) -> Result<Vec<String>>;
}
