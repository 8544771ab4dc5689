use serde::Serialize;
use std::collections::HashMap;

/// Tushare Pro 统一请求体
/// 所有接口均为 POST 同一地址, 以 api_name 区分具体接口
#[derive(Debug, Clone, Serialize)]
pub struct TushareRequest {
    pub api_name: String,
    pub token: String,
    pub params: HashMap<String, String>,
    pub fields: String,
}

impl TushareRequest {
    pub fn new(
        api_name: &str,
        token: &str,
        params: HashMap<String, String>,
        fields: &[&str],
    ) -> Self {
        Self {
            api_name: api_name.to_string(),
            token: token.to_string(),
            params,
            fields: fields.join(","),
        }
    }
}
