use thiserror::Error;

/// 应用程序错误类型
///
/// 只有批次级别的失败（拉取失败、CSV 无法解析）会以错误的形式向上传递；
/// 行级别与字段级别的问题在解析阶段就地吸收，不会出现在这里。
#[derive(Debug, Error)]
pub enum AppError {
    /// 远程表格拉取错误
    #[error("拉取错误: {0}")]
    Fetch(#[from] FetchError),
    /// CSV 解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 本地存储错误
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 远程表格拉取错误
#[derive(Debug, Error)]
pub enum FetchError {
    /// 网络请求失败
    #[error("请求失败 ({url}): {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务端返回非 2xx 状态码
    #[error("请求 {url} 返回状态码 {status}")]
    BadStatus { url: String, status: u16 },
    /// 地址无法解析
    #[error("无效的地址: {url}")]
    InvalidUrl { url: String },
}

/// CSV 解析错误
#[derive(Debug, Error)]
pub enum ParseError {
    /// CSV 格式无法识别
    #[error("CSV 解析失败 ({source_name}): {source}")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },
}

/// 本地存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    /// 读取失败
    #[error("读取 {key} 失败: {source}")]
    ReadFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入失败
    #[error("写入 {key} 失败: {source}")]
    WriteFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },
    /// 序列化失败
    #[error("序列化 {key} 失败: {source}")]
    SerializeFailed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("无法读取配置文件 {path}: {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML 解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建请求失败错误
    pub fn request_failed(url: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Fetch(FetchError::RequestFailed {
            url: url.into(),
            source,
        })
    }

    /// 创建状态码错误
    pub fn bad_status(url: impl Into<String>, status: u16) -> Self {
        AppError::Fetch(FetchError::BadStatus {
            url: url.into(),
            status,
        })
    }

    /// 创建 CSV 解析错误
    pub fn csv_failed(source_name: impl Into<String>, source: csv::Error) -> Self {
        AppError::Parse(ParseError::Csv {
            source_name: source_name.into(),
            source,
        })
    }

    /// 创建存储写入错误
    pub fn storage_write_failed(key: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Storage(StorageError::WriteFailed {
            key: key.into(),
            source,
        })
    }

    /// 是否为批次级别的拉取失败（需要展示给用户）
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, AppError::Fetch(_) | AppError::Parse(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
