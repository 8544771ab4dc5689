use clap::Parser;
use stockname::{
    apis::TushareApi,
    config::{set_global_config, Config},
    errors::{StocknameError, StocknameResult},
    init_tracing,
    resolver::CodeNameResolver,
    stocklist::normalize_code,
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "stockname")]
#[command(about = "A 股股票代码与名称查询工具")]
struct Args {
    /// 配置文件路径 (默认值: config.toml)
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// 待解析的股票代码 (不足 6 位自动补零)
    codes: Vec<String>,

    /// 逗号分隔代码列表的拉取地址 (覆盖配置中的 code_list_url)
    #[arg(long)]
    codes_url: Option<String>,
}

fn main() -> StocknameResult<()> {
    // 命令行参数解析
    let args = Args::parse();

    // 日志初始化 (仅控制台输出)
    init_tracing().map_err(|e| StocknameError::general(format!("日志系统初始化失败: {}", e)))?;

    info!("🚀 stockname 启动!");
    info!("📁 配置文件: {}", args.config);

    // 配置加载 (命令行指定的文件)
    let config = Config::load_from_file(&args.config)?;

    // 设为全局配置 (其他模块通过 get_config() 访问)
    set_global_config(config.clone())?;

    info!("✅ 配置加载完成");

    let api = TushareApi::new()?;
    let resolver = CodeNameResolver::from_config(Box::new(api))?;

    // 代码来源优先级: 命令行参数 > 远程代码列表 > 配置默认值
    let mut codes = args.codes;
    let codes_url = args
        .codes_url
        .unwrap_or_else(|| config.driver.code_list_url.clone());
    if codes.is_empty() && !codes_url.trim().is_empty() {
        match fetch_code_list(&codes_url) {
            Ok(fetched) => {
                info!("✅ 从 {} 拉取到 {} 个代码", codes_url, fetched.len());
                codes = fetched;
            }
            Err(e) => warn!("⚠️ 代码列表拉取失败, 改用默认代码: {}", e),
        }
    }
    if codes.is_empty() {
        codes = config.driver.default_codes.clone();
    }
    if codes.is_empty() {
        warn!("⚠️ 没有可解析的代码 (参数/code_list_url/default_codes 均为空)");
        return Ok(());
    }

    for code in &codes {
        let name = resolver.resolve(code)?;
        println!("{} {}", normalize_code(code), name);
    }

    Ok(())
}

/// 从固定 URL 拉取逗号分隔的代码列表 (仅驱动入口使用)
fn fetch_code_list(url: &str) -> StocknameResult<Vec<String>> {
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        let body = reqwest::get(url).await?.text().await?;
        Ok(body
            .split(',')
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty())
            .collect())
    })
}
