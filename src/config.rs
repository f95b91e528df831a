use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::models::FontChoice;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "assistant.toml";

/// 程序配置
///
/// 加载顺序：默认值 → TOML 配置文件（可选）→ 环境变量
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 导出文件存放目录
    pub output_dir: String,
    /// 会话日志文件
    pub output_log_file: String,
    /// Word 导出的默认字体
    pub default_font: FontChoice,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_max_tokens: u32,
    pub llm_temperature: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            output_log_file: "output.txt".to_string(),
            default_font: FontChoice::Arial,
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            llm_max_tokens: 4096,
            llm_temperature: 0.7,
        }
    }
}

impl Config {
    /// 按完整顺序加载配置
    ///
    /// 配置文件路径取自 `ASSISTANT_CONFIG`，该文件必须存在；
    /// 未设置时尝试当前目录下的 `assistant.toml`，文件不存在则跳过
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(std::env::var("ASSISTANT_CONFIG").ok())?.with_env_overrides()
    }

    /// 读取配置文件层，不含环境变量覆盖
    fn load_from(explicit: Option<String>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => {
                debug!("读取配置文件: {}", path);
                Self::from_toml_file(&path)
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                debug!("读取配置文件: {}", DEFAULT_CONFIG_FILE);
                Self::from_toml_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    /// 只使用环境变量覆盖默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件读取，未出现的字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 用环境变量覆盖当前配置
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        Ok(Self {
            output_dir: env_string("OUTPUT_DIR").unwrap_or(self.output_dir),
            output_log_file: env_string("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
            default_font: env_parsed("DEFAULT_FONT", "FontChoice")?.unwrap_or(self.default_font),
            verbose_logging: env_parsed("VERBOSE_LOGGING", "bool")?.unwrap_or(self.verbose_logging),
            llm_api_key: env_string("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: env_string("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: env_string("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            llm_max_tokens: env_parsed("LLM_MAX_TOKENS", "u32")?.unwrap_or(self.llm_max_tokens),
            llm_temperature: env_parsed("LLM_TEMPERATURE", "f32")?.unwrap_or(self.llm_temperature),
        })
    }
}

fn env_string(var_name: &str) -> Option<String> {
    std::env::var(var_name).ok()
}

fn env_parsed<T: std::str::FromStr>(var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_toml_partial_fields_keep_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "llm_model_name = \"gemini-2.0-flash\"\ndefault_font = \"Times New Roman\"\noutput_dir = \"hasil\""
        )
        .unwrap();

        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.llm_model_name, "gemini-2.0-flash");
        assert_eq!(config.default_font, FontChoice::TimesNewRoman);
        assert_eq!(config.output_dir, "hasil");
        assert_eq!(config.llm_max_tokens, Config::default().llm_max_tokens);
    }

    #[test]
    fn test_toml_parse_error_names_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "llm_max_tokens = \"many\"").unwrap();

        let err = Config::from_toml_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParseFailed { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Config::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileReadFailed { .. }));
    }

    #[test]
    fn test_explicit_config_path_must_exist() {
        let err = Config::load_from(Some("/definitely/not/assistant.toml".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::FileReadFailed { .. }));
        assert!(err.to_string().contains("/definitely/not/assistant.toml"));
    }

    #[test]
    fn test_explicit_config_path_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "llm_max_tokens = 512").unwrap();

        let config = Config::load_from(Some(file.path().display().to_string())).unwrap();
        assert_eq!(config.llm_max_tokens, 512);
    }
}
