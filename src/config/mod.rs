pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_args::CliConfig;

pub const SUPPORTED_FORMATS: [&str; 2] = ["json", "csv"];

#[cfg(feature = "cli")]
mod cli_args {
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_non_empty_list, validate_output_formats, validate_path, Validate,
    };
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "poem-index")]
    #[command(about = "Validate {poet}诗选.txt poem collections and build an index")]
    pub struct CliConfig {
        /// Poem files or directories containing *.txt files
        #[arg(required = true)]
        pub inputs: Vec<String>,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, value_delimiter = ',', default_value = "json")]
        pub formats: Vec<String>,

        #[arg(long, help = "Only validate, do not write the index")]
        pub check_only: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl ConfigProvider for CliConfig {
        fn inputs(&self) -> &[String] {
            &self.inputs
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }

        fn check_only(&self) -> bool {
            self.check_only
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_non_empty_list("inputs", &self.inputs)?;
            for input in &self.inputs {
                validate_path("inputs", input)?;
            }
            validate_path("output_path", &self.output_path)?;
            validate_output_formats("formats", &self.formats, &super::SUPPORTED_FORMATS)?;
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_args() {
            let config = CliConfig::parse_from([
                "poem-index",
                "李白诗选.txt",
                "poems/",
                "--formats",
                "json,csv",
                "--check-only",
            ]);
            assert_eq!(config.inputs, vec!["李白诗选.txt", "poems/"]);
            assert_eq!(config.formats, vec!["json", "csv"]);
            assert_eq!(config.output_path, "./output");
            assert!(config.check_only);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_rejects_unknown_format() {
            let config = CliConfig::parse_from(["poem-index", "a.txt", "--formats", "xml"]);
            assert!(config.validate().is_err());
        }
    }
}
