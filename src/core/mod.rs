pub mod engine;
pub mod parser;
pub mod pipeline;

pub use crate::domain::model::{IndexResult, PoemCollection, PoemRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
