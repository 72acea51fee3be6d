// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量 / 命令行配置日志级别，可选 JSON 输出
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 日志选项
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// 默认级别（RUST_LOG 未设置时生效）
    pub level: String,
    /// 是否输出 JSON 格式
    pub json: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（优先于 LogOptions::level）
///   例如: RUST_LOG=debug 或 RUST_LOG=boq_migrate=trace
///
/// # 示例
/// ```no_run
/// use boq_migrate::logging::{self, LogOptions};
/// logging::init(&LogOptions::default());
/// ```
pub fn init(options: &LogOptions) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&options.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    if options.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试；重复调用无副作用
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
