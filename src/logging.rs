//! 日誌初始化
//!
//! 使用 tracing 與 tracing-subscriber，日誌等級由 `RUST_LOG` 控制。

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日誌
///
/// `RUST_LOG` 未設定時預設為 `info`，例如 `RUST_LOG=shop_calc=debug`。
///
/// ```no_run
/// shop::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// 測試用日誌（可重複呼叫）
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
