pub mod stock;
pub mod types;

use thiserror::Error;

/// Tushare Pro API 错误类型
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    WebClientError(#[from] reqwest::Error),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    /// 接口层错误 (响应体 code != 0)
    #[error("接口调用失败: code={code}, msg={msg}")]
    ApiError { code: i64, msg: String },
    /// 响应缺少约定的字段或数据列
    #[error("响应缺少字段: {0}")]
    MissingField(String),
    #[error("无效数据")]
    InvalidData,
}

/// Tushare Pro 接口客户端
/// [接口说明](https://tushare.pro/document/1?doc_id=130)
///
/// 所有接口共用同一个 HTTP 入口, 以请求体中的 api_name 区分;
/// token 为个人中心生成的静态令牌, 附在每个请求体里, 无刷新流程。
pub struct TusharePro {
    pub stock: stock::Stock,
}

impl TusharePro {
    /// 用默认接口地址构造客户端
    pub fn new(token: &str) -> Self {
        Self::with_endpoint(token, types::DEFAULT_ENDPOINT_URL)
    }

    /// 指定接口地址构造客户端 (测试与代理场景)
    pub fn with_endpoint(token: &str, endpoint_url: &str) -> Self {
        let client = reqwest::Client::new();
        let stock = stock::Stock::new(&client, token, endpoint_url);
        Self { stock }
    }
}
