//! 答题记录
//!
//! 整个记录表序列化为一个 JSON 对象存放在一个键下，每次变更后整体重写。

use super::store::KeyValueStore;
use crate::error::{AppError, AppResult, StorageError};
use crate::models::{AttemptRecord, AttemptState};
use std::sync::Arc;
use tracing::{debug, warn};

/// 答题记录跟踪器
pub struct AttemptTracker {
    store: Arc<dyn KeyValueStore>,
    key: String,
    state: AttemptState,
}

impl AttemptTracker {
    /// 从存储加载答题记录，读取或解析失败时从空记录开始
    pub fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = match store.get(&key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("⚠️ 答题记录已损坏，重新开始: {}", e);
                AttemptState::new()
            }),
            Ok(None) => AttemptState::new(),
            Err(e) => {
                warn!("⚠️ 读取答题记录失败: {}", e);
                AttemptState::new()
            }
        };

        debug!("已加载 {} 条答题记录", state.len());
        Self { store, key, state }
    }

    /// 记录一次作答并持久化
    ///
    /// # 参数
    /// - `item_id`: 练习题 id
    /// - `correct`: 本次是否答对
    /// - `answer`: 本次的答案
    ///
    /// # 返回
    /// 返回更新后的记录
    pub fn record(
        &mut self,
        item_id: &str,
        correct: bool,
        answer: Option<&str>,
    ) -> AppResult<AttemptRecord> {
        let entry = self.state.entry(item_id.to_string()).or_default();
        entry.attempts += 1;
        entry.correct = correct;
        entry.last_answer = answer.map(str::to_string);
        let updated = entry.clone();

        self.persist()?;
        Ok(updated)
    }

    pub fn get(&self, item_id: &str) -> Option<&AttemptRecord> {
        self.state.get(item_id)
    }

    pub fn attempts(&self) -> &AttemptState {
        &self.state
    }

    /// 已答对的练习题数量
    pub fn completed_count(&self) -> usize {
        self.state.values().filter(|r| r.correct).count()
    }

    fn persist(&self) -> AppResult<()> {
        let json = serde_json::to_string(&self.state).map_err(|source| {
            AppError::Storage(StorageError::SerializeFailed {
                key: self.key.clone(),
                source,
            })
        })?;
        self.store.set(&self.key, &json)
    }
}
