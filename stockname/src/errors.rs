use thiserror::Error;

/// 系统所有错误类型的定义
/// 每个错误携带具体上下文信息, 便于调试与用户反馈
#[derive(Error, Debug)]
pub enum StocknameError {
    /// API 相关错误
    #[error("API 错误: {message}")]
    Api { message: String },

    /// Tushare Pro 接口特化错误
    #[error("Tushare 接口错误: {operation} 失败 - {reason}")]
    TushareApi { operation: String, reason: String },

    /// 本地股票列表文件两个路径均不可用
    #[error("股票列表文件缺失: 已尝试 {primary} 与 {fallback}")]
    StockListMissing { primary: String, fallback: String },

    /// 配置相关错误 (与 config.rs 的 ConfigError 联动)
    #[error("配置错误: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// 网络相关错误
    #[error("网络错误: {operation} - {reason}")]
    Network { operation: String, reason: String },

    /// 数据解析错误
    #[error("解析错误: {data_type} 解析失败 - {reason}")]
    Parsing { data_type: String, reason: String },

    /// 一般 I/O 错误
    #[error("I/O 错误: {operation} - {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// 其他一般错误
    #[error("错误: {message}")]
    General { message: String },
}

/// 系统统一使用的 Result 类型别名
pub type StocknameResult<T> = Result<T, StocknameError>;

impl StocknameError {
    /// API 错误的便捷构造
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Tushare 接口错误的便捷构造
    pub fn tushare_api(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TushareApi {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// 网络错误的便捷构造
    pub fn network(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Network {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// 解析错误的便捷构造
    pub fn parsing(data_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parsing {
            data_type: data_type.into(),
            reason: reason.into(),
        }
    }

    /// 一般错误的便捷构造
    pub fn general(message: impl Into<String>) -> Self {
        Self::General {
            message: message.into(),
        }
    }
}

/// tushare-api 库的错误转换
impl From<tushare_api::Error> for StocknameError {
    fn from(error: tushare_api::Error) -> Self {
        StocknameError::tushare_api("Tushare Pro API", error.to_string())
    }
}

/// std::io::Error 转换
impl From<std::io::Error> for StocknameError {
    fn from(error: std::io::Error) -> Self {
        StocknameError::Io {
            operation: "文件 I/O".to_string(),
            source: error,
        }
    }
}

/// reqwest 网络错误转换 (驱动入口的代码列表拉取使用)
impl From<reqwest::Error> for StocknameError {
    fn from(error: reqwest::Error) -> Self {
        StocknameError::Network {
            operation: "HTTP 请求".to_string(),
            reason: error.to_string(),
        }
    }
}

/// &str 转换
impl From<&str> for StocknameError {
    fn from(message: &str) -> Self {
        StocknameError::General {
            message: message.to_string(),
        }
    }
}

/// String 转换
impl From<String> for StocknameError {
    fn from(message: String) -> Self {
        StocknameError::General { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = StocknameError::StockListMissing {
            primary: "stocklist.csv".to_string(),
            fallback: "data/stocklist.csv".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "股票列表文件缺失: 已尝试 stocklist.csv 与 data/stocklist.csv"
        );
    }

    #[test]
    fn test_error_helpers() {
        let error = StocknameError::tushare_api("stock_basic", "连接超时");
        match error {
            StocknameError::TushareApi { operation, .. } => {
                assert_eq!(operation, "stock_basic");
            }
            _ => panic!("错误类型不符"),
        }
    }

    #[test]
    fn test_result_type() {
        fn test_function() -> StocknameResult<i32> {
            Ok(42)
        }

        assert_eq!(test_function().expect("Test function should succeed"), 42);
    }
}
