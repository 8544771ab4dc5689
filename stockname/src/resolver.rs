use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::errors::{StocknameError, StocknameResult};
use crate::stocklist::{self, normalize_code};
use crate::types::api::{ListingApi, StockListing};

/// 远程查询的内部结果
/// 把"没查到"与"数据源故障"区分开, 公开接口上二者都按未命中处理
enum RemoteLookup {
    Found(String),
    Miss,
    Unavailable(StocknameError),
}

/// 股票代码 → 股票名称解析器
///
/// 三级回退: 本地 CSV 表 → 远程股票列表 → "股票{代码}" 占位名称。
/// 两份缓存 (本地表/远程快照) 由解析器实例持有, 首次使用时加载,
/// 进程生命周期内最多各加载一次; 远程快照拉取结果为空时不算已加载,
/// 下次调用会重试。
pub struct CodeNameResolver {
    api: Box<dyn ListingApi>,
    primary_csv_path: String,
    fallback_csv_path: String,
    /// 本地代码→名称表, 空表示尚未加载
    local: Mutex<HashMap<String, String>>,
    /// 远程上市列表快照, 空表示尚未拉取或上次拉取为空
    remote: Mutex<Vec<StockListing>>,
}

impl CodeNameResolver {
    pub fn new(api: Box<dyn ListingApi>, primary_csv_path: &str, fallback_csv_path: &str) -> Self {
        Self {
            api,
            primary_csv_path: primary_csv_path.to_string(),
            fallback_csv_path: fallback_csv_path.to_string(),
            local: Mutex::new(HashMap::new()),
            remote: Mutex::new(Vec::new()),
        }
    }

    /// 从全局配置读取 CSV 路径构造
    pub fn from_config(api: Box<dyn ListingApi>) -> StocknameResult<Self> {
        let config = crate::config::get_config()?;
        Ok(Self::new(
            api,
            &config.stocklist.csv_path,
            &config.stocklist.fallback_csv_path,
        ))
    }

    /// 按代码解析股票名称
    ///
    /// 输入先左侧补零到 6 位再查询。唯一的错误来源是本地列表的
    /// 两个路径都无法读取 (启动配置错误); 远程数据源故障只记录警告
    /// 并继续走占位名称, 因此其余情况一定返回非空名称。
    pub fn resolve(&self, code: &str) -> StocknameResult<String> {
        let code = normalize_code(code);

        if let Some(name) = self.lookup_local(&code)? {
            debug!("🔍 [resolve] 本地命中: {} -> {}", code, name);
            return Ok(name);
        }

        match self.lookup_remote(&code) {
            RemoteLookup::Found(name) => {
                debug!("🔍 [resolve] 远程命中: {} -> {}", code, name);
                return Ok(name);
            }
            RemoteLookup::Miss => {}
            RemoteLookup::Unavailable(e) => {
                warn!("⚠️ [resolve] 远程数据源不可用, 按未命中处理: {}", e);
            }
        }

        Ok(format!("股票{}", code))
    }

    /// 本地表查询, 表为空时先加载
    /// 加载在锁内进行, 并发下最多加载一次
    fn lookup_local(&self, code: &str) -> StocknameResult<Option<String>> {
        let mut table = self.local.lock().unwrap_or_else(|e| e.into_inner());

        if table.is_empty() {
            *table = stocklist::load_stock_table(&self.primary_csv_path, &self.fallback_csv_path)?;
            info!("✅ [CodeNameResolver] 本地股票表加载完成: {} 只", table.len());
        }

        Ok(table.get(code).cloned())
    }

    /// 远程快照查询, 快照为空时先拉取
    ///
    /// 匹配规则: exchange_code 以规范化代码开头, 或 symbol 与之相等;
    /// 按数据源行序取第一个匹配, 该顺序是对外承诺的契约。
    /// 拉取在锁内进行, 空快照重试时不会并发发起多个请求。
    fn lookup_remote(&self, code: &str) -> RemoteLookup {
        let mut snapshot = self.remote.lock().unwrap_or_else(|e| e.into_inner());

        if snapshot.is_empty() {
            match self.api.fetch_stock_list() {
                Ok(items) => {
                    info!("✅ [CodeNameResolver] 远程快照拉取完成: {} 条", items.len());
                    *snapshot = items;
                }
                Err(e) => return RemoteLookup::Unavailable(e),
            }
        }

        for item in snapshot.iter() {
            if item.exchange_code.starts_with(code) || item.symbol == code {
                return RemoteLookup::Found(item.name.clone());
            }
        }

        RemoteLookup::Miss
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Write;
    use std::rc::Rc;

    /// 内存数据源 mock: 记录调用次数, 可配置返回内容或直接失败
    struct MockListingApi {
        items: Vec<StockListing>,
        fail: bool,
        calls: Rc<Cell<usize>>,
    }

    impl MockListingApi {
        fn new(items: Vec<StockListing>) -> (Self, Rc<Cell<usize>>) {
            let calls = Rc::new(Cell::new(0));
            (
                Self {
                    items,
                    fail: false,
                    calls: Rc::clone(&calls),
                },
                calls,
            )
        }

        fn failing() -> (Self, Rc<Cell<usize>>) {
            let calls = Rc::new(Cell::new(0));
            (
                Self {
                    items: Vec::new(),
                    fail: true,
                    calls: Rc::clone(&calls),
                },
                calls,
            )
        }
    }

    impl ListingApi for MockListingApi {
        fn fetch_stock_list(&self) -> StocknameResult<Vec<StockListing>> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(StocknameError::tushare_api("stock_basic", "连接超时"));
            }
            Ok(self.items.clone())
        }
    }

    fn listing(exchange_code: &str, symbol: &str, name: &str) -> StockListing {
        StockListing {
            exchange_code: exchange_code.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
        }
    }

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp csv");
        file.write_all(content.as_bytes()).expect("write temp csv");
        file
    }

    fn resolver_with(csv: &tempfile::NamedTempFile, api: MockListingApi) -> CodeNameResolver {
        let path = csv.path().to_str().expect("utf-8 path");
        CodeNameResolver::new(Box::new(api), path, path)
    }

    const LOCAL_CSV: &str = "symbol,name\n17,深中华A\n000019,深粮控股\n";

    #[test]
    fn test_local_hit_skips_remote() {
        let csv = write_csv(LOCAL_CSV);
        let (api, calls) = MockListingApi::new(vec![listing("000017.SZ", "000017", "远程名称")]);
        let resolver = resolver_with(&csv, api);

        assert_eq!(resolver.resolve("17").expect("resolve"), "深中华A");
        // 本地命中时不访问远程数据源
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let csv = write_csv(LOCAL_CSV);
        let (api, _calls) = MockListingApi::new(vec![]);
        let resolver = resolver_with(&csv, api);

        assert_eq!(
            resolver.resolve("17").expect("resolve"),
            resolver.resolve("000017").expect("resolve")
        );
    }

    #[test]
    fn test_remote_symbol_match() {
        let csv = write_csv(LOCAL_CSV);
        let (api, calls) = MockListingApi::new(vec![
            listing("600000.SH", "600000", "浦发银行"),
            listing("600036.SH", "600036", "招商银行"),
        ]);
        let resolver = resolver_with(&csv, api);

        assert_eq!(resolver.resolve("600036").expect("resolve"), "招商银行");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_remote_exchange_code_prefix_match() {
        let csv = write_csv(LOCAL_CSV);
        let (api, _calls) =
            MockListingApi::new(vec![listing("000021.SZ", "21", "深科技")]);
        let resolver = resolver_with(&csv, api);

        // symbol 字段不等于规范化代码, 但 exchange_code 前缀匹配
        assert_eq!(resolver.resolve("21").expect("resolve"), "深科技");
    }

    #[test]
    fn test_remote_first_match_wins() {
        let csv = write_csv(LOCAL_CSV);
        let (api, _calls) = MockListingApi::new(vec![
            listing("000100.SZ", "000100", "TCL科技"),
            listing("000100.BJ", "000100", "重复行"),
        ]);
        let resolver = resolver_with(&csv, api);

        assert_eq!(resolver.resolve("100").expect("resolve"), "TCL科技");
    }

    #[test]
    fn test_placeholder_when_absent_everywhere() {
        let csv = write_csv(LOCAL_CSV);
        let (api, _calls) = MockListingApi::new(vec![]);
        let resolver = resolver_with(&csv, api);

        assert_eq!(resolver.resolve("999999").expect("resolve"), "股票999999");
    }

    #[test]
    fn test_remote_failure_falls_back_to_placeholder() {
        let csv = write_csv(LOCAL_CSV);
        let (api, calls) = MockListingApi::failing();
        let resolver = resolver_with(&csv, api);

        assert_eq!(resolver.resolve("999999").expect("resolve"), "股票999999");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_empty_snapshot_retries_every_call() {
        let csv = write_csv(LOCAL_CSV);
        let (api, calls) = MockListingApi::new(vec![]);
        let resolver = resolver_with(&csv, api);

        let _ = resolver.resolve("999999").expect("resolve");
        let _ = resolver.resolve("999999").expect("resolve");
        // 空快照不算已加载, 每次调用都重试
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_nonempty_snapshot_fetched_once() {
        let csv = write_csv(LOCAL_CSV);
        let (api, calls) = MockListingApi::new(vec![
            listing("600000.SH", "600000", "浦发银行"),
            listing("600036.SH", "600036", "招商银行"),
        ]);
        let resolver = resolver_with(&csv, api);

        assert_eq!(resolver.resolve("600000").expect("resolve"), "浦发银行");
        assert_eq!(resolver.resolve("600036").expect("resolve"), "招商银行");
        // 非空快照缓存后不再重新拉取
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_resolve_never_fails_for_digit_codes() {
        let csv = write_csv(LOCAL_CSV);
        let (api, _calls) = MockListingApi::failing();
        let resolver = resolver_with(&csv, api);

        for code in ["1", "17", "001", "4500", "99999", "999999"] {
            let name = resolver.resolve(code).expect("resolve");
            assert!(!name.is_empty());
        }
    }

    #[test]
    fn test_missing_both_csv_paths_is_error() {
        let (api, calls) = MockListingApi::new(vec![]);
        let resolver = CodeNameResolver::new(
            Box::new(api),
            "/no/such/stocklist.csv",
            "/no/such/either.csv",
        );

        assert!(matches!(
            resolver.resolve("17"),
            Err(StocknameError::StockListMissing { .. })
        ));
        // 本地表加载失败属于配置错误, 不触发远程回退
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_known_and_unknown_code_scenario() {
        let csv = write_csv("symbol,name\n000017,深中华A\n");
        let (api, _calls) = MockListingApi::new(vec![]);
        let resolver = resolver_with(&csv, api);

        assert_eq!(resolver.resolve("17").expect("resolve"), "深中华A");
        assert_eq!(resolver.resolve("999999").expect("resolve"), "股票999999");
    }
}
