//! 数据同步 - 编排层
//!
//! ## 状态
//!
//! ```text
//! 启动（带缓存） → 拉取中 → 就绪（替换快照、清除错误、记录拉取时间）
//!                        ↘ 出错（保留原快照，只记录错误信息）
//! ```
//!
//! 两份表格并行拉取，必须都成功才会替换快照；
//! 一旦拿到过一份成功解析的快照，之后的失败不会让数据消失。
//!
//! 重叠的刷新不会串行化。每次拉取带一个递增的序号，
//! 某次结果到达时如果更新的请求已经成功替换过快照，这次结果直接丢弃；
//! 更新的请求失败不会挡住较早请求的成功结果。

use crate::cache::CacheStore;
use crate::clients::SheetSource;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::DataBundle;
use crate::parsing::build_bundle;
use crate::utils::logging::log_bundle_summary;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// 加载状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadState {
    pub loading: bool,
    pub error: Option<String>,
    pub last_fetched: Option<i64>,
}

/// 提供给展示层的只读视图
#[derive(Debug, Clone)]
pub struct DataView {
    pub data: Option<Arc<DataBundle>>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_fetched: Option<i64>,
}

/// 单次拉取的结果
#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    /// 快照已替换
    Updated(Arc<DataBundle>),
    /// 拉取失败，原快照保留
    Failed(String),
    /// 更新的请求已经落定，本次结果被丢弃
    Superseded,
}

/// 两个表格来源地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrls {
    pub grammar: String,
    pub practice: String,
}

impl SourceUrls {
    pub fn from_config(config: &Config) -> Self {
        Self {
            grammar: config.grammar_csv_url.clone(),
            practice: config.practice_csv_url.clone(),
        }
    }
}

struct SyncState {
    load: LoadState,
    bundle: Option<Arc<DataBundle>>,
    in_flight: usize,
    applied_generation: u64,
}

/// 数据同步器
///
/// 持有当前快照与加载状态，是唯一会替换快照的地方。
pub struct DataSync {
    source: Arc<dyn SheetSource>,
    cache: CacheStore,
    urls: SourceUrls,
    state: Mutex<SyncState>,
    next_generation: AtomicU64,
}

impl DataSync {
    /// 创建同步器，并读取缓存作为初始数据
    pub fn new(source: Arc<dyn SheetSource>, cache: CacheStore, urls: SourceUrls) -> Self {
        let cached = cache.load_from_cache().map(Arc::new);
        match &cached {
            Some(bundle) => info!(
                "📦 已从缓存加载 {} 个语法点、{} 道练习题",
                bundle.grammar_points.len(),
                bundle.practice_items.len()
            ),
            None => info!("📭 没有可用的缓存"),
        }

        Self {
            source,
            cache,
            urls,
            state: Mutex::new(SyncState {
                load: LoadState::default(),
                bundle: cached,
                in_flight: 0,
                applied_generation: 0,
            }),
            next_generation: AtomicU64::new(0),
        }
    }

    /// 当前视图
    pub async fn snapshot(&self) -> DataView {
        let state = self.state.lock().await;
        DataView {
            data: state.bundle.clone(),
            loading: state.load.loading,
            error: state.load.error.clone(),
            last_fetched: state.load.last_fetched,
        }
    }

    /// 当前快照
    pub async fn data(&self) -> Option<Arc<DataBundle>> {
        self.state.lock().await.bundle.clone()
    }

    /// 展示层调用的刷新入口
    pub async fn refresh(&self, force_refresh: bool) -> RefreshOutcome {
        self.fetch_data(force_refresh).await
    }

    /// 拉取两份表格并在成功时替换快照
    ///
    /// # 参数
    /// - `force_refresh`: 是否附加防缓存参数绕过中间缓存
    ///
    /// # 返回
    /// 返回本次拉取的结果；失败信息同时写入加载状态
    pub async fn fetch_data(&self, force_refresh: bool) -> RefreshOutcome {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().await;
            state.in_flight += 1;
            state.load.loading = true;
            state.load.error = None;
        }
        debug!("开始第 {} 次拉取 (强制刷新: {})", generation, force_refresh);

        let result = self.fetch_bundle(force_refresh).await;

        let mut state = self.state.lock().await;
        state.in_flight = state.in_flight.saturating_sub(1);
        state.load.loading = state.in_flight > 0;

        if generation <= state.applied_generation {
            warn!(
                "⏭️ 第 {} 次拉取的结果已过期（第 {} 次已替换快照），丢弃",
                generation, state.applied_generation
            );
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok(bundle) => {
                let fetched_at = match self
                    .cache
                    .save_cache(&bundle.grammar_points, &bundle.practice_items)
                {
                    Ok(saved_at) => saved_at,
                    Err(e) => {
                        warn!("⚠️ 写入缓存失败，仅更新内存数据: {}", e);
                        bundle.fetched_at
                    }
                };

                let bundle = Arc::new(DataBundle {
                    fetched_at,
                    ..bundle
                });
                state.applied_generation = generation;
                state.bundle = Some(Arc::clone(&bundle));
                state.load.error = None;
                state.load.last_fetched = Some(fetched_at);

                log_bundle_summary(&bundle);
                RefreshOutcome::Updated(bundle)
            }
            Err(e) => {
                let message = e.to_string();
                error!("❌ 拉取数据失败，保留现有数据: {}", message);
                state.load.error = Some(message.clone());
                RefreshOutcome::Failed(message)
            }
        }
    }

    async fn fetch_bundle(&self, force_refresh: bool) -> AppResult<DataBundle> {
        let (grammar_rows, practice_rows) = futures::try_join!(
            self.source.fetch_rows(&self.urls.grammar, force_refresh),
            self.source.fetch_rows(&self.urls.practice, force_refresh)
        )?;

        let now = chrono::Utc::now().timestamp_millis();
        Ok(build_bundle(&grammar_rows, &practice_rows, now))
    }
}
