//! 输入规范化 - 业务能力层
//!
//! 只负责"把一个文件变成题目文本"能力，不关心题目文本之后怎么用

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, ExtractError};
use crate::services::word_extractor::{DocxExtractor, WordExtractor};

/// 输入文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// 纯文本（`.txt`、`.md`、`.py` 以及所有未知扩展名）
    Text,
    /// Word 文档（`.doc`、`.docx`）
    Word,
}

impl InputKind {
    /// 按扩展名判断文件类型，大小写不敏感
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("doc") | Some("docx") => InputKind::Word,
            _ => InputKind::Text,
        }
    }
}

/// 输入规范化服务
///
/// Word 提取能力可以缺失（`without_word_support`），此时 Word 文件会得到"无法加载"错误
pub struct InputNormalizer {
    word_extractor: Option<Arc<dyn WordExtractor>>,
}

impl InputNormalizer {
    /// 使用内置的 docx 提取器
    pub fn new() -> Self {
        Self::with_extractor(Arc::new(DocxExtractor::new()))
    }

    /// 使用自定义提取器
    pub fn with_extractor(extractor: Arc<dyn WordExtractor>) -> Self {
        Self {
            word_extractor: Some(extractor),
        }
    }

    /// 不带 Word 提取能力
    pub fn without_word_support() -> Self {
        Self {
            word_extractor: None,
        }
    }

    /// 把文件读取为题目文本
    ///
    /// # 参数
    /// - `path`: 文件路径
    ///
    /// # 返回
    /// 返回纯文本；失败时错误消息包含文件路径
    pub async fn normalize(&self, path: &Path) -> AppResult<String> {
        let kind = InputKind::from_path(path);
        let path_str = path.display().to_string();
        debug!("读取输入文件: {} ({:?})", path_str, kind);

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            warn!("读取文件失败 {}: {}", path_str, e);
            AppError::file_read_failed(&path_str, e)
        })?;

        let text = match kind {
            InputKind::Text => decode_text(&bytes),
            InputKind::Word => {
                let extractor = self
                    .word_extractor
                    .as_ref()
                    .ok_or_else(|| AppError::word_extraction_failed(&path_str, ExtractError::Unavailable))?;
                extractor.extract_text(&bytes).map_err(|e| {
                    warn!("解析 Word 文档失败 {}: {}", path_str, e);
                    AppError::word_extraction_failed(&path_str, e)
                })?
            }
        };

        info!("✓ 已读取 {} ({} 字符)", path_str, text.chars().count());
        Ok(text)
    }
}

impl Default for InputNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// 按 UTF-8 解码，非法字节替换为 U+FFFD，去掉开头的 BOM
fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_kind_by_extension() {
        assert_eq!(InputKind::from_path(Path::new("tugas.docx")), InputKind::Word);
        assert_eq!(InputKind::from_path(Path::new("TUGAS.DOC")), InputKind::Word);
        assert_eq!(InputKind::from_path(Path::new("soal.md")), InputKind::Text);
        assert_eq!(InputKind::from_path(Path::new("main.py")), InputKind::Text);
        assert_eq!(InputKind::from_path(Path::new("data.csv")), InputKind::Text);
        assert_eq!(InputKind::from_path(Path::new("README")), InputKind::Text);
    }

    #[test]
    fn test_decode_text_strips_bom_and_replaces_invalid() {
        assert_eq!(decode_text(b"\xEF\xBB\xBFhalo"), "halo");
        assert_eq!(decode_text(b"a\xFFb"), "a\u{FFFD}b");
    }

    #[tokio::test]
    async fn test_normalize_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("soal.txt");
        std::fs::write(&path, "Buat fungsi penjumlahan").unwrap();

        let text = InputNormalizer::new().normalize(&path).await.unwrap();
        assert_eq!(text, "Buat fungsi penjumlahan");
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let err = InputNormalizer::new()
            .normalize(Path::new("/tidak/ada/soal.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Input(crate::error::InputError::ReadFailed { .. })));
    }

    #[tokio::test]
    async fn test_word_without_extractor_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("soal.docx");
        std::fs::write(&path, b"PK\x03\x04").unwrap();

        let err = InputNormalizer::without_word_support()
            .normalize(&path)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("无法加载 Word 读取组件"));
    }

    #[tokio::test]
    async fn test_corrupt_docx_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rusak.docx");
        std::fs::write(&path, b"bukan zip").unwrap();

        let err = InputNormalizer::new().normalize(&path).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Input(crate::error::InputError::WordExtraction {
                source: ExtractError::InvalidArchive(_),
                ..
            })
        ));
        assert!(err.to_string().contains("rusak.docx"));
    }
}
