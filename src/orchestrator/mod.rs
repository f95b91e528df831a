//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (一次完整运行)
//!     ↓
//! workflow::Session (会话状态与生命周期)
//!     ↓
//! services (能力层：input / llm / export)
//!     ↓
//! formatter (纯函数：classify + 渲染器)
//! ```

pub mod app;

pub use app::{App, RunReport, RunRequest};
