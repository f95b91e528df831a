//! Word 导出渲染
//!
//! 把分类后的块渲染成 Word 能直接打开的 HTML 文档

use super::blocks::{Block, Span};
use crate::models::FontChoice;

/// 渲染完整的 HTML 文档
///
/// body 上声明所选字体，标题用 `<h3>`，空行用 `<br>`，段落用 `<p>`
pub fn render_document(blocks: &[Block], font: FontChoice) -> String {
    let mut body = String::new();
    for block in blocks {
        render_block(&mut body, block);
        body.push('\n');
    }

    format!(
        r#"<html xmlns:o="urn:schemas-microsoft-com:office:office" xmlns:w="urn:schemas-microsoft-com:office:word" xmlns="http://www.w3.org/TR/REC-html40">
<head>
<meta charset="utf-8">
<title>Solusi Tugas</title>
<style>
body {{ font-family: {font}; font-size: 12pt; line-height: 1.5; }}
h3 {{ font-size: 14pt; margin: 12pt 0 6pt 0; }}
p {{ margin: 0 0 6pt 0; }}
</style>
</head>
<body>
{body}</body>
</html>
"#,
        font = font.css_value(),
        body = body,
    )
}

fn render_block(out: &mut String, block: &Block) {
    match block {
        Block::Break => out.push_str("<br>"),
        Block::Heading { text } => {
            out.push_str("<h3>");
            out.push_str(&escape_html(text));
            out.push_str("</h3>");
        }
        Block::Paragraph { spans } => {
            out.push_str("<p>");
            for span in spans {
                match span {
                    Span::Text(text) => out.push_str(&escape_html(text)),
                    Span::Bold(text) => {
                        out.push_str("<strong>");
                        out.push_str(&escape_html(text));
                        out.push_str("</strong>");
                    }
                }
            }
            out.push_str("</p>");
        }
    }
}

/// 转义 HTML 特殊字符
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::classify;

    #[test]
    fn test_document_declares_font() {
        let html = render_document(&classify("hello"), FontChoice::TimesNewRoman);
        assert!(html.contains("body { font-family: 'Times New Roman', serif;"));
    }

    #[test]
    fn test_heading_paragraph_and_break() {
        let html = render_document(
            &classify("**Bab 1**\nNilai: **42**\n\nakhir"),
            FontChoice::Arial,
        );
        assert!(html.contains("<h3>Bab 1</h3>"));
        assert!(html.contains("<p>Nilai: <strong>42</strong></p>"));
        assert!(html.contains("<br>"));
        assert!(html.contains("<p>akhir</p>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render_document(&classify("if a < b && c > d:"), FontChoice::Arial);
        assert!(html.contains("<p>if a &lt; b &amp;&amp; c &gt; d:</p>"));
    }
}
