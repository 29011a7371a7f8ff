//! 詩選文字檔的解析器
//!
//! 檔案格式：每首詩以獨立一行的 `《標題》` 開頭，後面接一行或多行詩句，
//! 詩與詩之間以一個或多個空行分隔。

use crate::domain::model::{PoemCollection, PoemRecord};
use crate::utils::error::FormatError;
use std::iter::Enumerate;
use std::str::{FromStr, Lines};

const TITLE_OPEN: char = '《';
const TITLE_CLOSE: char = '》';
const BOM: char = '\u{feff}';

/// 對同一份輸入可重複呼叫 [`records`](Self::records)，每次都從頭開始
#[derive(Debug, Clone, Copy)]
pub struct PoemFileParser<'a> {
    text: &'a str,
}

impl<'a> PoemFileParser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text: text.strip_prefix(BOM).unwrap_or(text),
        }
    }

    pub fn records(&self) -> Poems<'a> {
        Poems {
            lines: self.text.lines().enumerate(),
            finished: false,
        }
    }

    pub fn parse(&self) -> Result<PoemCollection, FormatError> {
        self.records().collect()
    }
}

impl<'a> IntoIterator for &PoemFileParser<'a> {
    type Item = Result<PoemRecord, FormatError>;
    type IntoIter = Poems<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.records()
    }
}

/// 解析整份文字，遇到第一個錯誤即停止
pub fn parse(text: &str) -> Result<PoemCollection, FormatError> {
    PoemFileParser::new(text).parse()
}

impl FromStr for PoemCollection {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// 逐首產生詩作的惰性迭代器；產生一個 `Err` 之後只會回傳 `None`
#[derive(Debug, Clone)]
pub struct Poems<'a> {
    lines: Enumerate<Lines<'a>>,
    finished: bool,
}

impl Poems<'_> {
    fn next_record(&mut self) -> Option<Result<PoemRecord, FormatError>> {
        let (line_no, title_line) = loop {
            let (idx, raw) = self.lines.next()?;
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                break (idx + 1, trimmed);
            }
        };

        let title = match parse_title(title_line, line_no) {
            Ok(title) => title,
            Err(e) => return Some(Err(e)),
        };

        let mut lines = Vec::new();
        for (_, raw) in self.lines.by_ref() {
            let line = raw.trim_end();
            if line.is_empty() {
                break;
            }
            lines.push(line.to_string());
        }

        if lines.is_empty() {
            return Some(Err(FormatError::EmptyBody {
                line: line_no,
                title,
            }));
        }

        Some(Ok(PoemRecord { title, lines }))
    }
}

impl Iterator for Poems<'_> {
    type Item = Result<PoemRecord, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let item = self.next_record();
        match &item {
            Some(Ok(record)) => {
                tracing::trace!(title = %record.title, lines = record.lines.len(), "parsed poem");
            }
            Some(Err(_)) | None => self.finished = true,
        }
        item
    }
}

impl std::iter::FusedIterator for Poems<'_> {}

/// `line` 已去除前後空白且非空
fn parse_title(line: &str, line_no: usize) -> Result<String, FormatError> {
    let opens = line.starts_with(TITLE_OPEN);
    let closes = line.ends_with(TITLE_CLOSE);

    match (opens, closes) {
        (true, true) => {
            let inner = line[TITLE_OPEN.len_utf8()..line.len() - TITLE_CLOSE.len_utf8()].trim();
            if inner.is_empty() {
                Err(FormatError::MalformedTitle {
                    line: line_no,
                    found: line.to_string(),
                })
            } else {
                Ok(inner.to_string())
            }
        }
        (true, _) | (_, true) => Err(FormatError::MalformedTitle {
            line: line_no,
            found: line.to_string(),
        }),
        (false, false) => Err(FormatError::ExpectedTitle {
            line: line_no,
            found: line.to_string(),
        }),
    }
}
