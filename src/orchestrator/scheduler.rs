//! 后台定时重新拉取
//!
//! 启动时立即拉取一次，之后按固定间隔拉取，直到句柄被停止或丢弃。
//! 每次拉取在独立任务中运行，停止定时器不会取消已经发出的请求。

use super::data_sync::DataSync;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// 定时拉取句柄，丢弃时停止定时器
pub struct RevalidationHandle {
    task: JoinHandle<()>,
}

impl RevalidationHandle {
    /// 停止定时器
    pub fn stop(self) {
        info!("⏹️ 停止后台定时拉取");
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for RevalidationHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// 启动后台定时拉取
///
/// # 参数
/// - `sync`: 数据同步器
/// - `interval`: 拉取间隔
pub fn start_revalidation(sync: Arc<DataSync>, interval: Duration) -> RevalidationHandle {
    info!("🔄 启动后台定时拉取，间隔 {} 秒", interval.as_secs());

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            debug!("定时拉取触发");

            let sync = Arc::clone(&sync);
            tokio::spawn(async move {
                sync.fetch_data(false).await;
            });
        }
    });

    RevalidationHandle { task }
}
