//! 数据快照缓存
//!
//! 持久化布局：两份集合（JSON 数组）+ 两个拉取时间（毫秒时间戳字符串，
//! 键名为集合键加 `_time` 后缀）。读取失败一律视为没有缓存。

use super::store::KeyValueStore;
use crate::config::Config;
use crate::error::{AppError, AppResult, StorageError};
use crate::models::{DataBundle, GrammarPoint, PracticeItem};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// 缓存键
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeys {
    pub grammar: String,
    pub practice: String,
}

impl CacheKeys {
    pub fn from_config(config: &Config) -> Self {
        Self {
            grammar: config.grammar_cache_key.clone(),
            practice: config.practice_cache_key.clone(),
        }
    }

    pub fn grammar_time(&self) -> String {
        format!("{}_time", self.grammar)
    }

    pub fn practice_time(&self) -> String {
        format!("{}_time", self.practice)
    }
}

/// 数据快照缓存
pub struct CacheStore {
    store: Arc<dyn KeyValueStore>,
    keys: CacheKeys,
}

impl CacheStore {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: CacheKeys) -> Self {
        Self { store, keys }
    }

    /// 读取缓存的数据快照
    ///
    /// 两份集合都能解析、且至少有一个非零时间戳时才返回；
    /// `fetched_at` 取两个时间戳中较早的一个。
    pub fn load_from_cache(&self) -> Option<DataBundle> {
        let grammar_points: Vec<GrammarPoint> = self.read_json(&self.keys.grammar)?;
        let practice_items: Vec<PracticeItem> = self.read_json(&self.keys.practice)?;

        let fetched_at = [self.keys.grammar_time(), self.keys.practice_time()]
            .iter()
            .filter_map(|key| self.read_timestamp(key))
            .filter(|ts| *ts != 0)
            .min();

        let Some(fetched_at) = fetched_at else {
            debug!("缓存缺少拉取时间，视为无缓存");
            return None;
        };

        Some(DataBundle::new(fetched_at, grammar_points, practice_items))
    }

    /// 保存两份集合，两个时间戳写入同一个当前时间
    ///
    /// 先把时间戳清零、最后再写入，中途失败时读回的是"没有缓存"而不是新旧混合的数据。
    ///
    /// # 返回
    /// 返回写入的时间戳
    pub fn save_cache(
        &self,
        grammar_points: &[GrammarPoint],
        practice_items: &[PracticeItem],
    ) -> AppResult<i64> {
        let now = chrono::Utc::now().timestamp_millis();
        self.save_cache_at(grammar_points, practice_items, now)?;
        Ok(now)
    }

    fn save_cache_at(
        &self,
        grammar_points: &[GrammarPoint],
        practice_items: &[PracticeItem],
        now: i64,
    ) -> AppResult<()> {
        self.store.set(&self.keys.grammar_time(), "0")?;
        self.store.set(&self.keys.practice_time(), "0")?;

        self.write_json(&self.keys.grammar, grammar_points)?;
        self.write_json(&self.keys.practice, practice_items)?;

        let stamp = now.to_string();
        self.store.set(&self.keys.grammar_time(), &stamp)?;
        self.store.set(&self.keys.practice_time(), &stamp)?;
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("⚠️ 读取缓存失败: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("⚠️ 缓存 {} 已损坏，忽略: {}", key, e);
                None
            }
        }
    }

    fn read_timestamp(&self, key: &str) -> Option<i64> {
        let raw = self.store.get(key).ok().flatten()?;
        let raw = raw.trim();
        raw.parse::<i64>()
            .ok()
            .or_else(|| raw.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v as i64))
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value).map_err(|source| {
            AppError::Storage(StorageError::SerializeFailed {
                key: key.to_string(),
                source,
            })
        })?;
        self.store.set(key, &json)
    }
}
