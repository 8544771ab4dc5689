use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::errors::{StocknameError, StocknameResult};

/// 规范化股票代码: 去空白后左侧补零至 6 位
/// 超过 6 位的输入原样保留
pub fn normalize_code(code: &str) -> String {
    format!("{:0>6}", code.trim())
}

/// 加载本地股票列表, 首选路径缺失时回退到备用路径
/// 两个路径都不可用属于启动配置问题, 返回错误而不是按未命中处理
pub fn load_stock_table(primary: &str, fallback: &str) -> StocknameResult<HashMap<String, String>> {
    let path = if Path::new(primary).exists() {
        primary
    } else {
        warn!("⚠️ 未找到 {}, 改用备用路径 {}", primary, fallback);
        fallback
    };

    if !Path::new(path).exists() {
        return Err(StocknameError::StockListMissing {
            primary: primary.to_string(),
            fallback: fallback.to_string(),
        });
    }

    read_csv(Path::new(path))
}

/// 读取 CSV: 按表头定位 symbol/name 两列
/// 重复代码按行序覆盖 (后出现的行生效)
fn read_csv(path: &Path) -> StocknameResult<HashMap<String, String>> {
    info!("🔄 开始读取股票列表: {}", path.display());

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => {
            warn!("⚠️ 股票列表为空文件: {}", path.display());
            return Ok(HashMap::new());
        }
    };

    let columns: Vec<&str> = header.split(',').map(|column| column.trim()).collect();
    let symbol_idx = columns
        .iter()
        .position(|column| *column == "symbol")
        .ok_or_else(|| {
            StocknameError::parsing("股票列表表头", format!("缺少 symbol 列: {}", header))
        })?;
    let name_idx = columns
        .iter()
        .position(|column| *column == "name")
        .ok_or_else(|| {
            StocknameError::parsing("股票列表表头", format!("缺少 name 列: {}", header))
        })?;

    let mut table = HashMap::new();
    let mut line_count = 1;

    for line in lines {
        let line = line?;
        line_count += 1;

        let parts: Vec<&str> = line.split(',').collect();
        let (Some(symbol), Some(name)) = (parts.get(symbol_idx), parts.get(name_idx)) else {
            warn!("⚠️ 跳过格式错误的第 {} 行: {}", line_count, line);
            continue;
        };

        let symbol = symbol.trim();
        let name = name.trim();
        if symbol.is_empty() || name.is_empty() {
            warn!("⚠️ 跳过字段为空的第 {} 行: {}", line_count, line);
            continue;
        }

        table.insert(normalize_code(symbol), name.to_string());
    }

    info!("✅ 从 {} 读取到 {} 只股票", path.display(), table.len());
    debug!(
        "前 10 个代码: {:?}",
        table.keys().take(10).collect::<Vec<_>>()
    );

    Ok(table)
}
