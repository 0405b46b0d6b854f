/// 表格 CSV 客户端
///
/// 封装对两个公开表格导出地址的 GET 请求
use crate::config::Config;
use crate::error::{AppError, AppResult, FetchError};
use crate::models::{parse_csv_rows, RawRow};
use async_trait::async_trait;
use tracing::debug;

/// 表格数据来源
///
/// 编排层只依赖这个接口，测试中可以替换为脚本化的实现。
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// 拉取并解析一份表格
    ///
    /// # 参数
    /// - `url`: 表格导出地址
    /// - `force_refresh`: 是否附加防缓存参数
    async fn fetch_rows(&self, url: &str, force_refresh: bool) -> AppResult<Vec<RawRow>>;
}

/// 基于 reqwest 的表格客户端
pub struct SheetClient {
    http: reqwest::Client,
}

impl SheetClient {
    /// 创建新的表格客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AppError::Other(format!("无法创建 HTTP 客户端: {}", e)))?;

        Ok(Self { http })
    }

    /// 获取表格原始文本
    ///
    /// 非 2xx 状态码视为失败
    pub async fn fetch_text(&self, url: &str) -> AppResult<String> {
        debug!("请求表格: {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::request_failed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::bad_status(url, status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::request_failed(url, e))
    }
}

#[async_trait]
impl SheetSource for SheetClient {
    async fn fetch_rows(&self, url: &str, force_refresh: bool) -> AppResult<Vec<RawRow>> {
        let now = chrono::Utc::now().timestamp_millis();
        let target = with_cache_buster(url, force_refresh, now)?;
        let text = self.fetch_text(&target).await?;
        parse_csv_rows(&text, url)
    }
}

/// 强制刷新时附加 `t=<毫秒时间戳>` 参数，绕过中间缓存
///
/// 地址本身已带查询参数时追加到末尾
pub fn with_cache_buster(url: &str, force_refresh: bool, now_ms: i64) -> AppResult<String> {
    if !force_refresh {
        return Ok(url.to_string());
    }

    let mut parsed = reqwest::Url::parse(url).map_err(|_| FetchError::InvalidUrl {
        url: url.to_string(),
    })?;
    parsed
        .query_pairs_mut()
        .append_pair("t", &now_ms.to_string());

    Ok(parsed.to_string())
}
