use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 语法点表格的 CSV 导出地址
    pub grammar_csv_url: String,
    /// 练习题表格的 CSV 导出地址
    pub practice_csv_url: String,
    /// 本地缓存目录
    pub cache_dir: String,
    /// 语法点缓存键
    pub grammar_cache_key: String,
    /// 练习题缓存键
    pub practice_cache_key: String,
    /// 答题记录缓存键
    pub attempts_cache_key: String,
    /// 后台重新拉取间隔（秒）
    pub revalidate_secs: u64,
    /// 单次请求超时（秒），不设置则不限制
    pub request_timeout_secs: Option<u64>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

/// 已发布表格的地址，不同工作表只差 `gid`
const PUBLISHED_SHEET: &str = "https://docs.google.com/spreadsheets/d/e/\
2PACX-1vQVRtxu8NCcv04qR_5yNY-lUaUqkzLTKouAoDI5vgh31AX6VRKxmjsMr9wgzDAvg_Qht3kCKE8VOUvU/pub";

fn published_csv_url(gid: u64) -> String {
    format!("{}?gid={}&single=true&output=csv", PUBLISHED_SHEET, gid)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grammar_csv_url: published_csv_url(253795148),
            practice_csv_url: published_csv_url(617041161),
            cache_dir: ".grammar_cache".to_string(),
            grammar_cache_key: "grammar_points_cache_v1".to_string(),
            practice_cache_key: "practice_items_cache_v1".to_string(),
            attempts_cache_key: "practice_attempts_v1".to_string(),
            revalidate_secs: 5 * 60,
            request_timeout_secs: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 默认配置 + 环境变量覆盖
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置（缺省字段使用默认值）
    pub fn from_toml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })?;
        Ok(config)
    }

    /// 加载配置：有配置文件则先读文件，环境变量始终优先
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let base = match path {
            Some(p) => Self::from_toml_file(p)?,
            None => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    fn with_env_overrides(self) -> Self {
        Self {
            grammar_csv_url: std::env::var("GRAMMAR_CSV_URL").unwrap_or(self.grammar_csv_url),
            practice_csv_url: std::env::var("PRACTICE_CSV_URL").unwrap_or(self.practice_csv_url),
            cache_dir: std::env::var("CACHE_DIR").unwrap_or(self.cache_dir),
            grammar_cache_key: self.grammar_cache_key,
            practice_cache_key: self.practice_cache_key,
            attempts_cache_key: self.attempts_cache_key,
            revalidate_secs: env_parse("REVALIDATE_SECS").unwrap_or(self.revalidate_secs),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS").or(self.request_timeout_secs),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
        }
    }

    /// 后台重新拉取间隔
    pub fn revalidate_interval(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs.max(1))
    }

    /// 单次请求超时
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// 读取并解析环境变量，不存在或无法解析时返回 `None`
fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
