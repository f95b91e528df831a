//! # Assignment Solver
//!
//! 作业解答助手：读取题目（直接输入、文本文件或 Word 文档），调用 LLM 生成解答，
//! 再导出为 Python 源文件或 Word 可打开的 HTML 文档
//!
//! ## 架构设计
//!
//! ### ① 格式化（Formatter）
//! - `formatter/` - 纯函数，`classify` 把解答按行分类，屏幕渲染和 HTML 导出共用
//!
//! ### ② 业务能力层（Services）
//! - `InputNormalizer` - 文件 → 题目文本
//! - `LlmService` - 题目 → 解答文本
//! - `exporter` - 解答 → 导出文件
//!
//! ### ③ 流程层（Workflow）
//! - `Session` - 唯一的可变状态：题目、格式、字体、结果、错误、忙碌标志
//!
//! ### ④ 编排层（Orchestration）
//! - `App` - 串起一次完整运行，写会话日志

pub mod config;
pub mod error;
pub mod formatter;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use formatter::{classify, Block, Span};
pub use models::{FontChoice, OutputFormat, SolutionResult};
pub use orchestrator::{App, RunReport, RunRequest};
pub use services::{InputNormalizer, LlmService, SolutionGenerator};
pub use workflow::{GenerateOutcome, Session, SessionSnapshot};
