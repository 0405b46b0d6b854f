/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use crate::cache::AttemptTracker;
use crate::config::Config;
use crate::models::DataBundle;
use crate::orchestrator::DataView;
use chrono::{DateTime, Local};
use tracing::{info, warn};

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 语法学习数据同步");
    info!("📄 语法点表格: {}", truncate_text(&config.grammar_csv_url, 80));
    info!("📄 练习题表格: {}", truncate_text(&config.practice_csv_url, 80));
    info!("📁 缓存目录: {}", config.cache_dir);
    info!("⏱️ 重新拉取间隔: {} 秒", config.revalidate_secs);
    info!("{}", "=".repeat(60));
}

/// 记录启动时的缓存状态
///
/// # 参数
/// - `bundle`: 缓存中的数据快照
/// - `now_ms`: 当前时间（毫秒时间戳）
pub fn log_cache_status(bundle: Option<&DataBundle>, now_ms: i64) {
    match bundle {
        Some(bundle) => info!(
            "📦 缓存数据拉取于 {}（{} 秒前）",
            format_timestamp(bundle.fetched_at),
            bundle.age_ms(now_ms) / 1000
        ),
        None => warn!("⚠️ 没有缓存数据，等待首次拉取"),
    }
}

/// 记录一次成功拉取得到的数据
pub fn log_bundle_summary(bundle: &DataBundle) {
    info!(
        "✓ 数据已更新: {} 个语法点, {} 道练习题 ({})",
        bundle.grammar_points.len(),
        bundle.practice_items.len(),
        format_timestamp(bundle.fetched_at)
    );
}

/// 打印最终统计信息
///
/// # 参数
/// - `view`: 当前视图
/// - `attempts`: 答题记录
pub fn print_final_stats(view: &DataView, attempts: &AttemptTracker) {
    info!("\n{}", "=".repeat(60));
    info!("📊 运行结束统计");
    info!("完成时间: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("{}", "=".repeat(60));
    match &view.data {
        Some(bundle) => {
            info!("📚 语法点: {}", bundle.grammar_points.len());
            info!("✏️ 练习题: {}", bundle.practice_items.len());
        }
        None => warn!("⚠️ 没有可用数据"),
    }
    if let Some(last) = view.last_fetched {
        info!("🕒 最近一次拉取: {}", format_timestamp(last));
    }
    if let Some(error) = &view.error {
        warn!("❌ 最近一次错误: {}", truncate_text(error, 120));
    }
    info!(
        "✅ 已答对: {}/{}",
        attempts.completed_count(),
        attempts.attempts().len()
    );
    info!("{}", "=".repeat(60));
}

/// 毫秒时间戳转本地时间文本
pub fn format_timestamp(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
