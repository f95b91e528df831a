//! Word 文本提取 - 业务能力层
//!
//! 只负责"把 docx 字节变成纯文本"，不关心文件从哪里来

use regex::{Captures, Regex};
use std::io::{Cursor, Read};
use std::sync::LazyLock;
use tracing::debug;

use crate::error::ExtractError;

/// 文本提取能力
///
/// 成功时返回纯文本，段落之间用空行分隔
pub trait WordExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// 段落属性里有制表位定义 `<w:tab .../>`，要先整体去掉，免得被当成正文制表符
static PARAGRAPH_PROPS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:pPr\b.*?</w:pPr>").expect("段落属性正则无效"));

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?P<end></w:p>)|(?P<empty><w:p(?:\s[^>]*)?/>)|<w:t(?:\s[^>]*)?>(?P<text>[^<]*)</w:t>|(?P<tab><w:tab(?:\s[^>]*)?/>)|(?P<br><w:(?:br|cr)(?:\s[^>]*)?/>)"#,
    )
    .expect("正文标记正则无效")
});

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("实体正则无效"));

/// 基于 zip 包读取 `word/document.xml` 的 docx 提取器
///
/// 旧版二进制 `.doc` 不是 zip 包，会返回 `ExtractError::InvalidArchive`
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl WordExtractor for DocxExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ExtractError::InvalidArchive(e.to_string()))?;

        let mut xml = String::new();
        {
            let mut body = archive
                .by_name("word/document.xml")
                .map_err(|_| ExtractError::MissingBody)?;
            body.read_to_string(&mut xml)?;
        }

        debug!("document.xml 长度: {} 字节", xml.len());
        Ok(document_xml_to_text(&xml))
    }
}

/// 把 `word/document.xml` 的内容转换为纯文本
pub fn document_xml_to_text(xml: &str) -> String {
    let xml = PARAGRAPH_PROPS_RE.replace_all(xml, "");

    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for caps in TOKEN_RE.captures_iter(&xml) {
        if caps.name("end").is_some() || caps.name("empty").is_some() {
            paragraphs.push(std::mem::take(&mut current));
        } else if let Some(text) = caps.name("text") {
            current.push_str(&unescape_xml(text.as_str()));
        } else if caps.name("tab").is_some() {
            current.push('\t');
        } else if caps.name("br").is_some() {
            current.push('\n');
        }
    }

    // 没有闭合的最后一段
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs.join("\n\n")
}

fn unescape_xml(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "amp" => Some('&'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            decoded.map(String::from).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
