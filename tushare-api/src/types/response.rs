use serde::Deserialize;

use crate::Error;

/// Tushare Pro 统一响应体
#[derive(Debug, Clone, Deserialize)]
pub struct TushareResponse {
    pub code: i64,
    pub msg: Option<String>,
    pub data: Option<TushareData>,
}

/// 列式数据块: fields 为列名, items 的每一行与 fields 对齐
#[derive(Debug, Clone, Deserialize)]
pub struct TushareData {
    pub fields: Vec<String>,
    pub items: Vec<Vec<serde_json::Value>>,
    #[serde(default)]
    pub has_more: bool,
}

impl TushareResponse {
    /// code != 0 时转为 ApiError, 否则取出数据块
    pub fn into_data(self) -> Result<TushareData, Error> {
        if self.code != 0 {
            return Err(Error::ApiError {
                code: self.code,
                msg: self.msg.unwrap_or_default(),
            });
        }
        self.data
            .ok_or_else(|| Error::MissingField("data".to_string()))
    }
}

impl TushareData {
    /// 按列名取列下标
    fn column(&self, name: &str) -> Result<usize, Error> {
        self.fields
            .iter()
            .position(|field| field == name)
            .ok_or_else(|| Error::MissingField(name.to_string()))
    }
}

/// stock_basic 的一行记录
#[derive(Debug, Clone, PartialEq)]
pub struct StockBasicItem {
    /// 交易所后缀形式代码 (如 "000017.SZ")
    pub ts_code: String,
    /// 纯数字代码 (如 "000017")
    pub symbol: String,
    /// 股票名称
    pub name: String,
}

impl StockBasicItem {
    /// 把列式数据转换为类型化记录, 保持接口返回的行序
    pub fn from_data(data: &TushareData) -> Result<Vec<Self>, Error> {
        let ts_code_idx = data.column("ts_code")?;
        let symbol_idx = data.column("symbol")?;
        let name_idx = data.column("name")?;

        let cell = |row: &Vec<serde_json::Value>, idx: usize| -> String {
            row.get(idx)
                .and_then(|value| value.as_str())
                .unwrap_or_default()
                .to_string()
        };

        Ok(data
            .items
            .iter()
            .map(|row| StockBasicItem {
                ts_code: cell(row, ts_code_idx),
                symbol: cell(row, symbol_idx),
                name: cell(row, name_idx),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(value: serde_json::Value) -> TushareResponse {
        serde_json::from_value(value).expect("deserialize response")
    }

    #[test]
    fn decode_stock_basic_rows() {
        let resp = response(serde_json::json!({
            "code": 0,
            "msg": null,
            "data": {
                "fields": ["ts_code", "symbol", "name"],
                "items": [
                    ["000001.SZ", "000001", "平安银行"],
                    ["000017.SZ", "000017", "深中华A"],
                ],
                "has_more": false
            }
        }));
        let data = resp.into_data().expect("data block");
        let items = StockBasicItem::from_data(&data).expect("typed rows");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].ts_code, "000001.SZ");
        assert_eq!(items[1].name, "深中华A");
    }

    #[test]
    fn field_order_does_not_matter() {
        let resp = response(serde_json::json!({
            "code": 0,
            "msg": null,
            "data": {
                "fields": ["name", "ts_code", "symbol"],
                "items": [["贵州茅台", "600519.SH", "600519"]]
            }
        }));
        let data = resp.into_data().expect("data block");
        let items = StockBasicItem::from_data(&data).expect("typed rows");
        assert_eq!(items[0].symbol, "600519");
        assert_eq!(items[0].name, "贵州茅台");
    }

    #[test]
    fn nonzero_code_is_api_error() {
        let resp = response(serde_json::json!({
            "code": 40001,
            "msg": "token 无效",
            "data": null
        }));
        match resp.into_data() {
            Err(Error::ApiError { code, msg }) => {
                assert_eq!(code, 40001);
                assert_eq!(msg, "token 无效");
            }
            other => panic!("期望 ApiError, 实际: {:?}", other),
        }
    }

    #[test]
    fn missing_column_is_error() {
        let data = TushareData {
            fields: vec!["ts_code".to_string(), "name".to_string()],
            items: vec![],
            has_more: false,
        };
        match StockBasicItem::from_data(&data) {
            Err(Error::MissingField(field)) => assert_eq!(field, "symbol"),
            other => panic!("期望 MissingField, 实际: {:?}", other),
        }
    }
}
