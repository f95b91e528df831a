//! 会话状态 - 流程层
//!
//! 核心职责：持有一次会话里唯一的一份可变状态，并定义它的生命周期
//!
//! - 题目文本：编辑或成功读取文件时被覆盖，从不清空
//! - 错误：每次生成开始时清空，任何失败路径都会写入
//! - 结果：只在生成成功时替换，且和提交时的格式绑定
//! - 忙碌标志：生成期间为 true，任何退出路径（成功、失败、future 被丢弃）都会复位

use serde::Serialize;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

use crate::error::ValidationError;
use crate::formatter::render_terminal;
use crate::models::{FontChoice, OutputFormat, SolutionResult};
use crate::services::{build_artifact, Artifact, InputNormalizer, SolutionGenerator};
use crate::utils::truncate_text;

/// 服务没有给出错误消息时使用的提示
pub const GENERIC_FAILURE_MESSAGE: &str = "生成解答失败，请稍后重试";

/// 一次 `generate` 调用的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// 生成成功，结果已更新
    Completed,
    /// 题目为空，未发起请求
    Rejected,
    /// 服务调用失败，错误已记录
    Failed,
    /// 已有生成在进行中，本次调用被忽略
    Busy,
}

#[derive(Debug, Default)]
struct SessionState {
    assignment_text: String,
    format: OutputFormat,
    font: FontChoice,
    result: Option<SolutionResult>,
    error: Option<String>,
    busy: bool,
}

/// 会话状态的只读快照
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub assignment_text: String,
    pub format: OutputFormat,
    pub font: FontChoice,
    pub result: Option<SolutionResult>,
    pub error: Option<String>,
    pub busy: bool,
}

/// 会话
///
/// 内部状态由互斥锁保护，锁从不跨越 `.await` 持有
#[derive(Debug, Default)]
pub struct Session {
    state: Mutex<SessionState>,
}

/// 生成期间持有，析构时复位忙碌标志
struct BusyGuard<'a> {
    session: &'a Session,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.session.lock().busy = false;
    }
}

impl Session {
    /// 创建新会话
    pub fn new(format: OutputFormat, font: FontChoice) -> Self {
        Self {
            state: Mutex::new(SessionState {
                format,
                font,
                ..SessionState::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 直接编辑题目文本
    pub fn set_assignment_text(&self, text: impl Into<String>) {
        self.lock().assignment_text = text.into();
    }

    /// 切换输出格式，只影响之后的生成
    pub fn set_format(&self, format: OutputFormat) {
        self.lock().format = format;
    }

    /// 切换导出字体
    pub fn set_font(&self, font: FontChoice) {
        self.lock().font = font;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        SessionSnapshot {
            assignment_text: state.assignment_text.clone(),
            format: state.format,
            font: state.font,
            result: state.result.clone(),
            error: state.error.clone(),
            busy: state.busy,
        }
    }

    /// 读取文件作为题目文本
    ///
    /// 文件选择和拖放共用这个入口：只处理第一个文件，其余忽略，空列表什么也不做。
    /// 成功时覆盖题目文本并清空错误；失败时记录错误，题目文本保持不变
    ///
    /// # 返回
    /// 返回题目文本是否被更新
    pub async fn load_files<P: AsRef<Path>>(&self, normalizer: &InputNormalizer, paths: &[P]) -> bool {
        let Some(first) = paths.first() else {
            return false;
        };
        if paths.len() > 1 {
            debug!("收到 {} 个文件，只读取第一个", paths.len());
        }

        match normalizer.normalize(first.as_ref()).await {
            Ok(text) => {
                let mut state = self.lock();
                state.assignment_text = text;
                state.error = None;
                true
            }
            Err(e) => {
                warn!("⚠️ 文件读取失败: {}", e);
                self.lock().error = Some(e.to_string());
                false
            }
        }
    }

    /// 生成解答
    ///
    /// 同一时间最多只有一个生成在进行，忙碌时再次调用直接返回 `GenerateOutcome::Busy`。
    /// 提交时的格式会被捕获并绑定到结果上，生成期间切换格式不影响这次的结果
    pub async fn generate<G: SolutionGenerator>(&self, generator: &G) -> GenerateOutcome {
        let (assignment, format) = {
            let mut state = self.lock();
            if state.busy {
                debug!("已有生成在进行中，忽略本次请求");
                return GenerateOutcome::Busy;
            }

            state.error = None;
            if state.assignment_text.trim().is_empty() {
                state.error = Some(ValidationError::EmptyAssignment.to_string());
                return GenerateOutcome::Rejected;
            }

            state.busy = true;
            (state.assignment_text.clone(), state.format)
        };
        let _busy = BusyGuard { session: self };

        info!(
            "🤖 正在生成解答 (格式: {}) | 题目: {}",
            format,
            truncate_text(assignment.trim(), 40)
        );

        let response = generator.generate(&assignment, format).await;

        let mut state = self.lock();
        match response {
            Ok(text) => {
                info!("✓ 解答生成完成 ({} 字符)", text.chars().count());
                state.result = Some(SolutionResult::new(text, format));
                state.error = None;
                GenerateOutcome::Completed
            }
            Err(e) => {
                error!("❌ 解答生成失败: {}", e);
                state.error = Some(failure_message(&e));
                GenerateOutcome::Failed
            }
        }
    }

    /// 当前结果的终端渲染
    pub fn render(&self, styled: bool) -> Option<String> {
        self.lock()
            .result
            .as_ref()
            .map(|result| render_terminal(result, styled))
    }

    /// 构建当前结果的导出文件，没有结果时返回 `None`
    pub fn export(&self) -> Option<Artifact> {
        let state = self.lock();
        build_artifact(state.result.as_ref(), state.font)
    }
}

fn failure_message(err: &impl std::fmt::Display) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        message
    }
}
