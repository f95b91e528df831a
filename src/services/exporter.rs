//! 导出服务 - 业务能力层
//!
//! 只负责"把解答变成可下载文件"能力：先在内存里构建文件内容，再写入本地目录

use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::ExportError;
use crate::formatter::{classify, render_document};
use crate::models::{FontChoice, OutputFormat, SolutionResult};

/// 待写出的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// 构建导出文件
///
/// - `python`：原样输出解答文本，不做任何转换
/// - `word`：经过分类规则渲染成 HTML 文档，`font` 决定 body 的字体
///
/// 解答为空时返回 `None`
pub fn build_artifact(result: Option<&SolutionResult>, font: FontChoice) -> Option<Artifact> {
    let result = result.filter(|r| !r.is_empty())?;
    let format = result.format();

    let bytes = match format {
        OutputFormat::Python => result.text().as_bytes().to_vec(),
        OutputFormat::Word => render_document(&classify(result.text()), font).into_bytes(),
    };

    debug!("构建导出文件: {} ({} 字节)", format.file_name(), bytes.len());

    Some(Artifact {
        file_name: format.file_name(),
        content_type: format.content_type(),
        bytes,
    })
}

/// 把导出文件写入目录
///
/// 先写到同目录的临时文件，再原子地改名为最终文件名；临时文件句柄在返回前释放。
/// 最终文件的权限和普通新建文件一致（受 umask 约束），而不是临时文件默认的仅属主可读
pub fn write_artifact(artifact: &Artifact, output_dir: &Path) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(output_dir).map_err(|source| ExportError::CreateDirFailed {
        path: output_dir.display().to_string(),
        source,
    })?;

    let target = output_dir.join(artifact.file_name);
    let write_failed = |source| ExportError::WriteFailed {
        path: target.display().to_string(),
        source,
    };

    let mut temp = temp_builder().tempfile_in(output_dir).map_err(write_failed)?;
    temp.write_all(&artifact.bytes).map_err(write_failed)?;
    temp.persist(&target).map_err(|e| write_failed(e.error))?;

    info!("💾 已导出: {} ({})", target.display(), artifact.content_type);
    Ok(target)
}

#[cfg(unix)]
fn temp_builder() -> tempfile::Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;

    let mut builder = tempfile::Builder::new();
    // open(2) 会再套用 umask
    builder.permissions(std::fs::Permissions::from_mode(0o666));
    builder
}

#[cfg(not(unix))]
fn temp_builder() -> tempfile::Builder<'static, 'static> {
    tempfile::Builder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_artifact_is_raw_text() {
        let text = "def add(a, b):\n    # **jumlahkan**\n    return a + b\n";
        let result = SolutionResult::new(text, OutputFormat::Python);

        let artifact = build_artifact(Some(&result), FontChoice::TimesNewRoman).unwrap();
        assert_eq!(artifact.file_name, "solusi_tugas.py");
        assert_eq!(artifact.content_type, "text/plain;charset=utf-8");
        assert_eq!(artifact.bytes, text.as_bytes());
    }

    #[test]
    fn test_word_artifact_is_html_document() {
        let text = "**Pendahuluan**\nParagraf pertama dengan **kata penting**.\n\nParagraf kedua.";
        let result = SolutionResult::new(text, OutputFormat::Word);

        let artifact = build_artifact(Some(&result), FontChoice::TimesNewRoman).unwrap();
        let html = String::from_utf8(artifact.bytes).unwrap();
        assert_eq!(artifact.file_name, "solusi_tugas.doc");
        assert_eq!(artifact.content_type, "application/msword");
        assert!(html.contains("<h3>Pendahuluan</h3>"));
        assert!(html.contains("<strong>kata penting</strong>"));
        assert!(html.contains("font-family: 'Times New Roman'"));
    }

    #[test]
    fn test_empty_result_has_no_artifact() {
        assert!(build_artifact(None, FontChoice::Arial).is_none());
        let empty = SolutionResult::new("", OutputFormat::Word);
        assert!(build_artifact(Some(&empty), FontChoice::Arial).is_none());
    }

    #[test]
    fn test_whitespace_result_is_still_exported() {
        let blank = SolutionResult::new("  \n", OutputFormat::Python);
        let artifact = build_artifact(Some(&blank), FontChoice::Arial).unwrap();
        assert_eq!(artifact.bytes, b"  \n");
    }

    #[test]
    fn test_write_artifact_leaves_only_target() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("hasil");
        let result = SolutionResult::new("print('halo')\n", OutputFormat::Python);
        let artifact = build_artifact(Some(&result), FontChoice::Arial).unwrap();

        let path = write_artifact(&artifact, &out).unwrap();
        assert_eq!(path, out.join("solusi_tugas.py"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "print('halo')\n");

        let entries: Vec<_> = std::fs::read_dir(&out).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_artifact_mode_matches_plain_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let result = SolutionResult::new("print('halo')\n", OutputFormat::Python);
        let artifact = build_artifact(Some(&result), FontChoice::Arial).unwrap();
        let path = write_artifact(&artifact, dir.path()).unwrap();

        let plain = dir.path().join("biasa.txt");
        std::fs::write(&plain, "x").unwrap();

        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&plain));
    }
}
