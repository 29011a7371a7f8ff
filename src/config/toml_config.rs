use crate::core::ConfigProvider;
use crate::utils::error::{PoemError, Result};
use crate::utils::validation::{
    validate_non_empty_list, validate_non_empty_string, validate_output_formats, validate_path,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub index: IndexConfig,
    pub source: SourceConfig,
    pub load: LoadConfig,
    pub validation: Option<ValidationConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub inputs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub check_only: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PoemError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${POEM_DIR})，未定義的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn check_only(&self) -> bool {
        self.validation
            .as_ref()
            .and_then(|v| v.check_only)
            .unwrap_or(false)
    }

    pub fn set_check_only(&mut self, check_only: bool) {
        self.validation
            .get_or_insert(ValidationConfig { check_only: None })
            .check_only = Some(check_only);
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref()?.log_level.as_deref()
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            == Some("json")
    }
}

impl ConfigProvider for TomlConfig {
    fn inputs(&self) -> &[String] {
        &self.source.inputs
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn check_only(&self) -> bool {
        TomlConfig::check_only(self)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("index.name", &self.index.name)?;

        validate_non_empty_list("source.inputs", &self.source.inputs)?;
        for input in &self.source.inputs {
            validate_path("source.inputs", input)?;
        }

        validate_path("load.output_path", &self.load.output_path)?;
        validate_output_formats(
            "load.output_formats",
            &self.load.output_formats,
            &super::SUPPORTED_FORMATS,
        )?;

        if let Some(format) = self.monitoring.as_ref().and_then(|m| m.log_format.as_deref()) {
            if format != "json" && format != "compact" {
                return Err(PoemError::InvalidConfigValueError {
                    field: "monitoring.log_format".to_string(),
                    value: format.to_string(),
                    reason: "Valid formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[index]
name = "tang-poems"
description = "唐诗选"

[source]
inputs = ["poems/李白诗选.txt", "poems/杜甫诗选.txt"]

[load]
output_path = "./index"
output_formats = ["json", "csv"]
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.index.name, "tang-poems");
        assert_eq!(config.inputs().len(), 2);
        assert_eq!(config.output_path(), "./index");
        assert!(!config.check_only());
        assert!(config.log_level().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("POEM_INDEX_TEST_DIR", "/data/poems");

        let toml_content = r#"
[index]
name = "env"

[source]
inputs = ["${POEM_INDEX_TEST_DIR}", "${POEM_INDEX_UNDEFINED_VAR}"]

[load]
output_path = "./output"
output_formats = ["json"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.inputs[0], "/data/poems");
        assert_eq!(config.source.inputs[1], "${POEM_INDEX_UNDEFINED_VAR}");

        std::env::remove_var("POEM_INDEX_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[index]
name = "bad"

[source]
inputs = []

[load]
output_path = "./output"
output_formats = ["xml"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(PoemError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_check_only_and_monitoring() {
        let toml_content = format!(
            "{}\n[validation]\ncheck_only = true\n\n[monitoring]\nlog_level = \"warn\"\nlog_format = \"json\"\n",
            BASIC
        );
        let mut config = TomlConfig::from_toml_str(&toml_content).unwrap();
        assert!(config.check_only());
        assert_eq!(config.log_level(), Some("warn"));
        assert!(config.json_logs());

        config.set_check_only(false);
        assert!(!config.check_only());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[index\nname = ");
        assert!(matches!(result, Err(PoemError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.index.name, "tang-poems");
    }
}
