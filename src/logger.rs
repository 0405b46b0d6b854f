use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 默认 `info`，`verbose` 时为 `debug`；设置了 `RUST_LOG` 时以其为准
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("grammar_study={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
