/// 输出格式枚举
///
/// 同时决定请求 LLM 时的回答形态和导出路径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Python 源代码
    #[default]
    Python,
    /// Word 文档（HTML 包装）
    Word,
}

impl OutputFormat {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Python => "python",
            OutputFormat::Word => "word",
        }
    }

    /// 导出文件名
    pub fn file_name(self) -> &'static str {
        match self {
            OutputFormat::Python => "solusi_tugas.py",
            OutputFormat::Word => "solusi_tugas.doc",
        }
    }

    /// 导出文件的内容类型
    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Python => "text/plain;charset=utf-8",
            OutputFormat::Word => "application/msword",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "python" | "py" => Ok(OutputFormat::Python),
            "word" | "doc" | "docx" => Ok(OutputFormat::Word),
            other => Err(format!("未知的输出格式: {}", other)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 导出字体
///
/// 只影响 Word 格式的导出，不影响题目文本和解答内容
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum FontChoice {
    #[default]
    #[serde(rename = "Arial")]
    Arial,
    #[serde(rename = "Times New Roman")]
    TimesNewRoman,
}

impl FontChoice {
    /// 字体族名称
    pub fn family(self) -> &'static str {
        match self {
            FontChoice::Arial => "Arial",
            FontChoice::TimesNewRoman => "Times New Roman",
        }
    }

    /// CSS 中使用的 font-family 声明值（带后备字体）
    pub fn css_value(self) -> &'static str {
        match self {
            FontChoice::Arial => "'Arial', sans-serif",
            FontChoice::TimesNewRoman => "'Times New Roman', serif",
        }
    }
}

impl std::str::FromStr for FontChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arial" => Ok(FontChoice::Arial),
            "times" | "times new roman" | "times-new-roman" => Ok(FontChoice::TimesNewRoman),
            other => Err(format!("未知的字体: {}", other)),
        }
    }
}

impl std::fmt::Display for FontChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.family())
    }
}
