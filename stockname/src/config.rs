use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件未找到: {0}")]
    FileNotFound(String),
    #[error("配置文件读取错误: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("配置文件解析错误: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("配置有效性校验失败: {0}")]
    ValidationError(String),
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub stocklist: StockListConfig,
    pub tushare: TushareConfig,
    #[serde(default)]
    pub driver: DriverConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StockListConfig {
    /// 首选本地股票列表 CSV 路径
    pub csv_path: String,
    /// 首选路径不存在时使用的备用路径
    pub fallback_csv_path: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TushareConfig {
    /// Tushare Pro 个人中心生成的接口 token
    pub token: String,
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,
}

fn default_endpoint_url() -> String {
    tushare_api::types::DEFAULT_ENDPOINT_URL.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DriverConfig {
    /// 未通过参数指定代码时解析的默认代码
    pub default_codes: Vec<String>,
    /// 逗号分隔代码列表的拉取地址, 留空表示不拉取
    pub code_list_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    /// 从 config.toml 文件加载配置
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_file("config.toml")
    }

    /// 从指定文件加载配置
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        if !Path::new(path).exists() {
            return Err(ConfigError::FileNotFound(format!(
                "{}不存在。请复制 config.example.toml 为 config.toml 并填写配置。",
                path
            )));
        }

        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        // 环境变量覆盖
        config.apply_env_overrides();

        config.validate()?;
        Ok(config)
    }

    /// 用环境变量覆盖文件中的配置
    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("TUSHARE_TOKEN") {
            self.tushare.token = token;
        }
        if let Ok(path) = std::env::var("STOCKLIST_CSV_PATH") {
            self.stocklist.csv_path = path;
        }
        if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// 配置有效性校验
    fn validate(&self) -> Result<(), ConfigError> {
        if self.stocklist.csv_path.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "stocklist.csv_path 不能为空".to_string(),
            ));
        }
        if self.stocklist.fallback_csv_path.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "stocklist.fallback_csv_path 不能为空".to_string(),
            ));
        }
        if self.tushare.endpoint_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "tushare.endpoint_url 不能为空".to_string(),
            ));
        }
        // RUST_LOG 可能是过滤表达式, 这里只要求非空
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.level 不能为空".to_string(),
            ));
        }
        Ok(())
    }
}

/// 全局配置实例 (只加载一次)
static GLOBAL_CONFIG: std::sync::OnceLock<Option<Config>> = std::sync::OnceLock::new();

/// 获取全局配置实例
pub fn get_config() -> Result<&'static Config, ConfigError> {
    let config_option = GLOBAL_CONFIG.get_or_init(|| match Config::load() {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("配置加载失败: {}", e);
            eprintln!("请复制 config.example.toml 为 config.toml 并填写配置。");
            None
        }
    });

    config_option
        .as_ref()
        .ok_or_else(|| ConfigError::FileNotFound("无法加载配置".to_string()))
}

/// 设置全局配置 (main.rs 使用)
pub fn set_global_config(config: Config) -> Result<(), ConfigError> {
    GLOBAL_CONFIG
        .set(Some(config))
        .map_err(|_| ConfigError::ValidationError("全局配置已经初始化".to_string()))
}
