use std::rc::Rc;

use tracing::info;
use tushare_api::types::ListStatus;
use tushare_api::TusharePro;

use crate::config;
use crate::errors::{StocknameError, StocknameResult};
use crate::types::api::{ListingApi, StockListing};

/// Tushare Pro 数据源实现
pub struct TushareApi {
    api: Rc<TusharePro>,
}

impl TushareApi {
    /// 从全局配置构造 (token 与接口地址)
    pub fn new() -> StocknameResult<Self> {
        let config = config::get_config()?;
        let api = TusharePro::with_endpoint(&config.tushare.token, &config.tushare.endpoint_url);

        info!("🔗 [TushareApi] Tushare Pro 接口初始化完成");

        Ok(Self { api: Rc::new(api) })
    }
}

impl ListingApi for TushareApi {
    fn fetch_stock_list(&self) -> StocknameResult<Vec<StockListing>> {
        let rt = tokio::runtime::Runtime::new()?;
        let api = Rc::clone(&self.api);

        rt.block_on(async {
            let items = api
                .stock
                .stock_basic(ListStatus::Listed, &["ts_code", "symbol", "name"])
                .await
                .map_err(|e| StocknameError::tushare_api("stock_basic", e.to_string()))?;

            info!("✅ [TushareApi] 股票列表拉取完成: {} 条", items.len());

            Ok(items
                .into_iter()
                .map(|item| StockListing {
                    exchange_code: item.ts_code,
                    symbol: item.symbol,
                    name: item.name,
                })
                .collect())
        })
    }
}
