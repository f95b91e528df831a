//! LLM 服务 - 业务能力层
//!
//! 只负责"根据题目生成解答"能力，不关心状态和流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Doubao 等）

use std::future::Future;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::LlmError;
use crate::models::OutputFormat;

/// 解答生成能力
///
/// 会话层只依赖这个 trait，测试时可以替换成假的实现
pub trait SolutionGenerator: Send + Sync {
    /// 根据题目文本和输出格式生成解答文本
    fn generate(
        &self,
        assignment: &str,
        format: OutputFormat,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}

const PYTHON_SYSTEM_PROMPT: &str = "You are an expert programming tutor. \
Solve the assignment with a single, complete, runnable Python 3 program. \
Return only Python source code without Markdown fences. \
Put every explanation in Python comments. \
Write comments in the same language as the assignment.";

const WORD_SYSTEM_PROMPT: &str = "You are an expert academic tutor. \
Write a complete, well-structured solution to the assignment. \
Use plain text with this formatting only: put each section title on its own line wrapped in double asterisks \
(for example **Introduction**), mark important words inline with **double asterisks**, \
and separate paragraphs with a blank line. Do not use other Markdown syntax. \
Answer in the same language as the assignment.";

/// 按输出格式选择系统提示词
pub fn system_prompt(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Python => PYTHON_SYSTEM_PROMPT,
        OutputFormat::Word => WORD_SYSTEM_PROMPT,
    }
}

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API 生成解答
/// - 不持有题目文本、结果或忙碌状态
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    max_tokens: u32,
    temperature: f32,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            max_tokens: config.llm_max_tokens,
            temperature: config.llm_temperature,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（去掉首尾空白）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String, LlmError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let api_failed = |source| LlmError::ApiCallFailed {
            model: self.model_name.clone(),
            source,
        };

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(api_failed)?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(api_failed)?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(api_failed)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            api_failed(e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }
}

impl SolutionGenerator for LlmService {
    async fn generate(&self, assignment: &str, format: OutputFormat) -> Result<String, LlmError> {
        debug!("生成解答，格式: {}", format);
        self.send_to_llm(assignment, Some(system_prompt(format))).await
    }
}
