//! 字符串键值存储
//!
//! 本地缓存只需要"按键读写字符串"的能力，
//! 文件实现用于真实运行，内存实现用于测试和不需要持久化的场景。

use crate::error::{AppError, AppResult, StorageError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// 字符串键值存储接口
pub trait KeyValueStore: Send + Sync {
    /// 读取键，不存在时返回 `Ok(None)`
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// 写入键（整体覆盖）
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
}

/// 文件存储：每个键对应缓存目录下的一个文件
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(AppError::Storage(StorageError::ReadFailed {
                key: key.to_string(),
                source,
            })),
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| AppError::storage_write_failed(key, e))?;

        // 先写临时文件再改名，避免读到写了一半的内容
        let target = self.path_for(key);
        let tmp = self.dir.join(format!("{}.tmp", key));
        std::fs::write(&tmp, value).map_err(|e| AppError::storage_write_failed(key, e))?;
        std::fs::rename(&tmp, &target).map_err(|e| AppError::storage_write_failed(key, e))?;

        Ok(())
    }
}

/// 内存存储
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
