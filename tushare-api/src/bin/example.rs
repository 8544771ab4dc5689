use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use thiserror::Error;
use tushare_api::types::{Config, ListStatus};
use tushare_api::TusharePro;

#[derive(Parser)]
#[command(name = "opt", about = "example")]
struct Opt {
    config_path: PathBuf,
}

#[derive(Debug, Error)]
enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    TomlDeserializeError(#[from] toml::de::Error),
    #[error(transparent)]
    ApiError(#[from] tushare_api::Error),
}

fn get_config(path: &PathBuf) -> Result<Config, Error> {
    let mut buf = String::new();
    let mut fd = std::fs::File::open(path)?;
    let _len = fd.read_to_string(&mut buf)?;
    Ok(toml::from_str(&buf)?)
}

#[tokio::main]
async fn main() {
    let Opt { config_path } = Opt::parse();
    let config = get_config(&config_path).unwrap();
    let api = TusharePro::with_endpoint(config.token(), config.endpoint_or_default());

    // 股票列表查询示例
    let items = api
        .stock
        .stock_basic(ListStatus::Listed, &["ts_code", "symbol", "name"])
        .await
        .unwrap();
    println!("共 {} 只股票", items.len());
    for item in items.iter().take(10) {
        println!("{} {} {}", item.ts_code, item.symbol, item.name);
    }
}
