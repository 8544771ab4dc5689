use tracing_log::LogTracer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// tracing 初始化函数
/// 代替 env_logger 使用, 提供 JSON 结构化日志与 span 追踪。
pub fn init_tracing() -> Result<(), String> {
    // 兼容既有 log! 宏
    LogTracer::init().map_err(|e| {
        eprintln!("Failed to set LogTracer: {}", e);
        format!("日志系统初始化失败: {}", e)
    })?;

    // JSON 结构化日志 + 基于 RUST_LOG 的级别过滤 + 文件名/行号
    let subscriber = Registry::default()
        .with(EnvFilter::from_default_env())
        .with(
            fmt::layer()
                .json()
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        );

    tracing::subscriber::set_global_default(subscriber).map_err(|e| {
        eprintln!("Failed to set tracing subscriber: {}", e);
        format!("日志系统初始化失败: {}", e)
    })?;

    Ok(())
}

pub mod apis;
pub mod config;
pub mod errors;
pub mod resolver;
pub mod stocklist;
pub mod types;
