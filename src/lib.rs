pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::parser::{parse, PoemFileParser, Poems};
pub use core::{engine::IndexEngine, pipeline::PoemPipeline};
pub use domain::model::{PoemCollection, PoemRecord};
pub use utils::error::{FileFailure, FormatError, PoemError, Result};
