//! # Grammar Study
//!
//! 从在线表格同步语法点与练习题，本地缓存并定时重新拉取
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models / Parsing）
//! - `models/` - 语法点、练习题、数据快照、答题记录
//! - `models::loaders` - CSV 文本 → 原始行
//! - `parsing/` - 行规范化、字段别名提取、记录构建、排序
//!
//! ### ② 基础设施层（Clients / Cache）
//! - `clients/` - `SheetSource` 拉取表格，`SheetClient` 基于 HTTP 的实现
//! - `cache/` - 键值存储、数据快照缓存、答题记录
//!
//! ### ③ 业务能力层（Services）
//! - `Catalog` - 查询、筛选、上下篇导航
//! - `answer_checker` - 判断答案是否正确
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/data_sync` - 拉取、整体替换快照、失败保留旧数据
//! - `orchestrator/scheduler` - 定时重新拉取
//! - `orchestrator/app` - 应用入口

pub mod cache;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod parsing;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{DataBundle, GrammarPoint, PracticeItem};
pub use orchestrator::{App, DataSync, DataView};
pub use parsing::build_bundle;
