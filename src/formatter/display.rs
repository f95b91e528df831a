//! 屏幕展示渲染

use colored::Colorize;

use super::blocks::{classify, Block, Span};
use crate::models::{OutputFormat, SolutionResult};

/// 把解答渲染成终端文本
///
/// Python 解答按原样输出；Word 解答走分类规则，标题和加粗片段在 `styled` 时加粗显示
pub fn render_terminal(result: &SolutionResult, styled: bool) -> String {
    match result.format() {
        OutputFormat::Python => result.text().to_string(),
        OutputFormat::Word => render_blocks(&classify(result.text()), styled),
    }
}

/// 渲染块序列
pub fn render_blocks(blocks: &[Block], styled: bool) -> String {
    let mut lines = Vec::with_capacity(blocks.len());

    for block in blocks {
        let line = match block {
            Block::Break => String::new(),
            Block::Heading { text } => {
                if styled {
                    text.bold().underline().to_string()
                } else {
                    format!("== {} ==", text)
                }
            }
            Block::Paragraph { spans } => spans
                .iter()
                .map(|span| match span {
                    Span::Text(text) => text.clone(),
                    Span::Bold(text) if styled => text.bold().to_string(),
                    Span::Bold(text) => text.clone(),
                })
                .collect(),
        };
        lines.push(line);
    }

    lines.join("\n")
}
