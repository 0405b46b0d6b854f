//! 应用入口 - 编排层
//!
//! 组装文件存储、表格客户端与数据同步器，运行后台定时拉取直到收到退出信号。

use crate::cache::{AttemptTracker, CacheKeys, CacheStore, FileStore, KeyValueStore};
use crate::clients::SheetClient;
use crate::config::Config;
use crate::orchestrator::data_sync::{DataSync, DataView, SourceUrls};
use crate::orchestrator::scheduler::start_revalidation;
use crate::utils::logging::{log_cache_status, log_startup, print_final_stats};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// 应用主结构
pub struct App {
    config: Config,
    sync: Arc<DataSync>,
    attempts: AttemptTracker,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.cache_dir));
        let client = SheetClient::new(&config).context("无法创建表格客户端")?;
        let cache = CacheStore::new(Arc::clone(&store), CacheKeys::from_config(&config));
        let sync = Arc::new(DataSync::new(
            Arc::new(client),
            cache,
            SourceUrls::from_config(&config),
        ));
        let attempts = AttemptTracker::load(store, &config.attempts_cache_key);

        let now = chrono::Utc::now().timestamp_millis();
        log_cache_status(sync.data().await.as_deref(), now);

        Ok(Self {
            config,
            sync,
            attempts,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let handle = start_revalidation(Arc::clone(&self.sync), self.config.revalidate_interval());

        info!("💡 按 Ctrl-C 退出");
        tokio::signal::ctrl_c()
            .await
            .context("无法监听退出信号")?;

        handle.stop();
        print_final_stats(&self.view().await, &self.attempts);

        Ok(())
    }

    /// 当前视图
    pub async fn view(&self) -> DataView {
        self.sync.snapshot().await
    }

    pub fn sync(&self) -> &Arc<DataSync> {
        &self.sync
    }
}
