//! 解答结果
//!
//! 解答文本与生成它时使用的输出格式绑定在一起，创建后不可修改

use serde::Serialize;

use super::format::OutputFormat;

/// 一次成功生成的解答
///
/// `format` 是提交时捕获的格式，之后用户再切换格式也不会影响这份结果的渲染
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolutionResult {
    text: String,
    format: OutputFormat,
}

impl SolutionResult {
    /// 用 LLM 返回的文本和提交时的格式创建解答
    pub fn new(text: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// 解答是否为空字符串，只有空白的解答不算空
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
