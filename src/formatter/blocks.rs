//! 行分类
//!
//! 屏幕展示和 Word 导出共用同一套分类规则，两边的标题/加粗判定必须完全一致

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// 整行被一对 `**...**` 包裹（中间不含 `*`）时视为标题
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*([^*]+)\*\*$").expect("标题正则无效"));

/// 行内加粗片段，非贪婪、不重叠
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("加粗正则无效"));

/// 行内片段
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Span {
    Text(String),
    Bold(String),
}

/// 分类后的块
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Block {
    /// 空行
    Break,
    /// 标题行，已去掉 `**` 标记
    Heading { text: String },
    /// 普通段落
    Paragraph { spans: Vec<Span> },
}

/// 把解答文本按物理行分类为块序列
///
/// 规则：
/// 1. 空行或只有空白的行 → `Block::Break`
/// 2. 去掉首尾空白后整行被 `**...**` 包裹 → `Block::Heading`
/// 3. 其他行 → `Block::Paragraph`，其中每个 `**text**` 变成加粗片段
///
/// 行尾的 `\r` 会被忽略，所以 CRLF 文本与 LF 文本结果相同
pub fn classify(text: &str) -> Vec<Block> {
    text.split('\n')
        .map(|line| classify_line(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

fn classify_line(line: &str) -> Block {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Block::Break;
    }

    if let Some(caps) = HEADING_RE.captures(trimmed) {
        return Block::Heading {
            text: caps[1].to_string(),
        };
    }

    Block::Paragraph {
        spans: split_spans(line),
    }
}

fn split_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in BOLD_RE.captures_iter(line) {
        let whole = caps.get(0).map(|m| m.range()).unwrap_or(last..last);
        if whole.start > last {
            spans.push(Span::Text(line[last..whole.start].to_string()));
        }
        spans.push(Span::Bold(caps[1].to_string()));
        last = whole.end;
    }

    if last < line.len() {
        spans.push(Span::Text(line[last..].to_string()));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_line() {
        assert_eq!(
            classify("**Section 1**"),
            vec![Block::Heading {
                text: "Section 1".to_string()
            }]
        );
    }

    #[test]
    fn test_heading_with_surrounding_whitespace() {
        assert_eq!(
            classify("   **Langkah 2**  "),
            vec![Block::Heading {
                text: "Langkah 2".to_string()
            }]
        );
    }

    #[test]
    fn test_paragraph_with_bold_span() {
        assert_eq!(
            classify("Result: **42**"),
            vec![Block::Paragraph {
                spans: vec![Span::Text("Result: ".to_string()), Span::Bold("42".to_string())]
            }]
        );
    }

    #[test]
    fn test_two_bold_spans_is_not_heading() {
        assert_eq!(
            classify("**A** plus **B**"),
            vec![Block::Paragraph {
                spans: vec![
                    Span::Bold("A".to_string()),
                    Span::Text(" plus ".to_string()),
                    Span::Bold("B".to_string()),
                ]
            }]
        );
    }

    #[test]
    fn test_blank_lines_become_breaks() {
        let blocks = classify("first\n\n   \nsecond");
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[1], Block::Break);
        assert_eq!(blocks[2], Block::Break);
    }

    #[test]
    fn test_crlf_matches_lf() {
        assert_eq!(
            classify("**Judul**\r\nisi **tebal**\r\n"),
            classify("**Judul**\nisi **tebal**\n")
        );
    }

    #[test]
    fn test_unclosed_marker_stays_text() {
        assert_eq!(
            classify("a ** b"),
            vec![Block::Paragraph {
                spans: vec![Span::Text("a ** b".to_string())]
            }]
        );
    }

    #[test]
    fn test_classify_is_deterministic() {
        let text = "**Pendahuluan**\n\nTeks dengan **tebal** dan biasa.\n**A** dan **B**\n";
        assert_eq!(classify(text), classify(text));
    }

    #[test]
    fn test_blocks_serialize_with_kind_tag() {
        let json = serde_json::to_value(classify("**H**\n\nx **y**")).unwrap();
        assert_eq!(json[0]["kind"], "heading");
        assert_eq!(json[0]["text"], "H");
        assert_eq!(json[1]["kind"], "break");
        assert_eq!(json[2]["spans"][1]["kind"], "bold");
        assert_eq!(json[2]["spans"][1]["text"], "y");
    }
}
