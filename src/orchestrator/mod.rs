//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `data_sync` - 数据同步器
//! - 持有当前数据快照与加载状态
//! - 并行拉取两份表格，成功后整体替换快照并写入缓存
//! - 失败时保留原快照，只记录错误
//!
//! ### `scheduler` - 定时拉取
//! - 启动时拉取一次，之后按固定间隔拉取
//! - 句柄停止或丢弃时取消定时器
//!
//! ### `app` - 应用入口
//! - 组装存储、客户端、同步器
//! - 运行到收到退出信号为止
//!
//! ## 层次关系
//!
//! ```text
//! app
//!     ↓
//! scheduler → data_sync
//!     ↓
//! clients (拉取) / parsing (解析、排序) / cache (持久化)
//! ```

pub mod app;
pub mod data_sync;
pub mod scheduler;

pub use app::App;
pub use data_sync::{DataSync, DataView, LoadState, RefreshOutcome, SourceUrls};
pub use scheduler::{start_revalidation, RevalidationHandle};
