use crate::errors::StocknameResult;

/// 数据源返回的一条上市记录
#[derive(Debug, Clone, PartialEq)]
pub struct StockListing {
    /// 交易所后缀形式代码 (如 "000017.SZ")
    pub exchange_code: String,
    /// 纯数字代码 (如 "000017")
    pub symbol: String,
    /// 股票名称
    pub name: String,
}

/// 所有股票列表数据源必须实现的基础 trait
/// 生产环境为 Tushare Pro, 测试中为内存 mock
pub trait ListingApi {
    /// 拉取当前上市股票的完整列表
    /// 返回的行序即数据源行序 (解析器按此顺序取第一个匹配)
    fn fetch_stock_list(&self) -> StocknameResult<Vec<StockListing>>;
}
