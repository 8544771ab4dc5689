pub mod tushare_api;

pub use tushare_api::TushareApi;
