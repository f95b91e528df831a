use thiserror::Error;

/// 应用程序错误类型
///
/// 每一类错误都在发生的边界被捕获，最终以一条可读消息展示给用户
#[derive(Debug, Error)]
pub enum AppError {
    /// 提交校验失败（未发起任何 I/O）
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// 读取输入文件失败
    #[error("{0}")]
    Input(#[from] InputError),
    /// LLM 服务错误
    #[error("{0}")]
    Llm(#[from] LlmError),
    /// 导出失败
    #[error("{0}")]
    Export(#[from] ExportError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// 题目为空或只有空白
    #[error("请先输入或上传作业题目")]
    EmptyAssignment,
}

/// 输入文件错误
#[derive(Debug, Error)]
pub enum InputError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Word 文档解析失败
    #[error("无法读取 Word 文档 ({path}): {source}")]
    WordExtraction {
        path: String,
        #[source]
        source: ExtractError,
    },
}

/// Word 文本提取错误
#[derive(Debug, Error)]
pub enum ExtractError {
    /// 提取组件不可用
    #[error("无法加载 Word 读取组件")]
    Unavailable,
    /// 不是可识别的 docx 压缩包（旧版 .doc 或文件已损坏）
    #[error("文件不是有效的 docx 文档: {0}")]
    InvalidArchive(String),
    /// 缺少正文部分
    #[error("文档中缺少正文 (word/document.xml)")]
    MissingBody,
    /// 读取正文失败
    #[error("读取文档正文失败: {0}")]
    Io(#[from] std::io::Error),
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 构建请求失败或 API 调用失败
    #[error("LLM API 调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: async_openai::error::OpenAIError,
    },
    /// 返回内容为空
    #[error("LLM 返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 导出错误
#[derive(Debug, Error)]
pub enum ExportError {
    /// 创建输出目录失败
    #[error("无法创建输出目录 ({path}): {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件读取失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Input(InputError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建 Word 解析错误
    pub fn word_extraction_failed(path: impl Into<String>, source: ExtractError) -> Self {
        AppError::Input(InputError::WordExtraction {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_extractor_message() {
        let err = AppError::word_extraction_failed("tugas.docx", ExtractError::Unavailable);
        let msg = err.to_string();
        assert!(msg.contains("tugas.docx"));
        assert!(msg.contains("无法加载 Word 读取组件"));
    }

    #[test]
    fn test_validation_message_is_bare() {
        let err = AppError::from(ValidationError::EmptyAssignment);
        assert_eq!(err.to_string(), "请先输入或上传作业题目");
    }
}
