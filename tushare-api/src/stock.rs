use std::collections::HashMap;

use crate::types::{ListStatus, StockBasicItem, TushareRequest, TushareResponse};
use crate::Error;

/// 股票基础数据相关接口
/// [沪深股票列表](https://tushare.pro/document/2?doc_id=25)
#[derive(Clone)]
pub struct Stock {
    client: reqwest::Client,
    endpoint_url: String,
    token: String,
}

impl Stock {
    pub fn new(client: &reqwest::Client, token: &str, endpoint_url: &str) -> Self {
        Self {
            client: client.clone(),
            endpoint_url: endpoint_url.to_string(),
            token: token.to_string(),
        }
    }

    /// 股票列表 (stock_basic)
    /// 返回指定上市状态的全部股票, 行序与接口返回一致
    pub async fn stock_basic(
        &self,
        list_status: ListStatus,
        fields: &[&str],
    ) -> Result<Vec<StockBasicItem>, Error> {
        let mut params = HashMap::new();
        params.insert(
            "list_status".to_string(),
            Into::<String>::into(list_status),
        );
        let request = TushareRequest::new("stock_basic", &self.token, params, fields);

        tracing::debug!("🔍 [stock_basic] POST {}", self.endpoint_url);

        let response = self
            .client
            .post(&self.endpoint_url)
            .header("Content-Type", "application/json")
            .body(serde_json::json!(request).to_string())
            .send()
            .await?
            .json::<TushareResponse>()
            .await?;

        let data = response.into_data()?;
        StockBasicItem::from_data(&data)
    }
}
