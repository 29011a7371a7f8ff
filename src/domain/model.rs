use crate::utils::error::FileFailure;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 檔名慣例 `{poet}诗选.txt` 的後綴
pub const COLLECTION_SUFFIX: &str = "诗选.txt";

/// 一首詩：標題與依閱讀順序排列的詩句
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemRecord {
    pub title: String,
    pub lines: Vec<String>,
}

impl PoemRecord {
    pub fn new(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            lines,
        }
    }

    /// 詩句中非空白字元的數量
    pub fn char_count(&self) -> usize {
        self.lines
            .iter()
            .flat_map(|line| line.chars())
            .filter(|c| !c.is_whitespace())
            .count()
    }
}

impl fmt::Display for PoemRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "《{}》", self.title)?;
        for line in &self.lines {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

/// 一個檔案解析出的全部詩作，依檔案順序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemCollection {
    pub records: Vec<PoemRecord>,
}

impl PoemCollection {
    pub fn new(records: Vec<PoemRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PoemRecord> {
        self.records.iter()
    }
}

impl IntoIterator for PoemCollection {
    type Item = PoemRecord;
    type IntoIter = std::vec::IntoIter<PoemRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a PoemCollection {
    type Item = &'a PoemRecord;
    type IntoIter = std::slice::Iter<'a, PoemRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<PoemRecord> for PoemCollection {
    fn from_iter<I: IntoIterator<Item = PoemRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// 記錄之間以一個空行分隔，結尾帶換行；重新解析可得到相同的集合
impl fmt::Display for PoemCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}

/// 從 `李白诗选.txt` 這類檔名取出詩人名；不符合慣例時回傳 `None`
pub fn poet_from_filename(file_name: &str) -> Option<String> {
    let poet = file_name.strip_suffix(COLLECTION_SUFFIX)?.trim();
    if poet.is_empty() {
        None
    } else {
        Some(poet.to_string())
    }
}

/// extract 階段讀到的原始檔案
#[derive(Debug, Clone)]
pub struct ExtractedFile {
    pub file: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedFile {
    pub file: String,
    pub poet: Option<String>,
    pub poems: PoemCollection,
}

#[derive(Debug, Clone, Default)]
pub struct IndexResult {
    pub files: Vec<IndexedFile>,
    pub failures: Vec<FileFailure>,
}

impl IndexResult {
    pub fn poem_count(&self) -> usize {
        self.files.iter().map(|f| f.poems.len()).sum()
    }
}

/// 寫出的 JSON 索引
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoemIndex {
    pub generated_at: DateTime<Utc>,
    pub files: Vec<IndexedFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poet_from_filename() {
        assert_eq!(poet_from_filename("李白诗选.txt"), Some("李白".to_string()));
        assert_eq!(poet_from_filename("杜甫诗选.txt"), Some("杜甫".to_string()));
        assert_eq!(poet_from_filename("诗选.txt"), None);
        assert_eq!(poet_from_filename("notes.txt"), None);
    }

    #[test]
    fn test_record_display() {
        let record = PoemRecord::new(
            "静夜思",
            vec!["床前明月光".to_string(), "疑是地上霜".to_string()],
        );
        assert_eq!(record.to_string(), "《静夜思》\n床前明月光\n疑是地上霜");
    }

    #[test]
    fn test_collection_display_separates_with_blank_line() {
        let collection = PoemCollection::new(vec![
            PoemRecord::new("诗一", vec!["句一".to_string()]),
            PoemRecord::new("诗二", vec!["句二".to_string(), "句三".to_string()]),
        ]);
        assert_eq!(collection.to_string(), "《诗一》\n句一\n\n《诗二》\n句二\n句三\n");
        assert_eq!(PoemCollection::default().to_string(), "");
    }

    #[test]
    fn test_char_count_ignores_whitespace() {
        let record = PoemRecord::new("题", vec!["床前 明月光，".to_string(), "　疑是".to_string()]);
        assert_eq!(record.char_count(), 8);
    }
}
