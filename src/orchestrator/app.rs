//! 应用编排 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：日志文件、LLM 服务、输入规范化服务
//! 2. **一次完整运行**：读取题目 → 生成解答 → 渲染 → 导出
//! 3. **会话记录**：把每次运行的结果写入会话日志
//!
//! 不做具体业务判断，只调度 workflow 和 services

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::Config;
use crate::formatter::classify;
use crate::models::{FontChoice, OutputFormat};
use crate::services::{write_artifact, InputNormalizer, LlmService, SolutionGenerator};
use crate::utils::logging::{append_log_entry, init_log_file, log_startup};
use crate::workflow::{GenerateOutcome, Session};

/// 一次运行的输入
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// 直接输入的题目文本，给出时不再读取 `files`
    pub text: Option<String>,
    /// 题目文件（只读取第一个）
    pub files: Vec<PathBuf>,
    pub format: OutputFormat,
    /// 未指定时使用配置中的默认字体
    pub font: Option<FontChoice>,
    /// 是否写出导出文件
    pub export: bool,
    /// 以 JSON 块序列代替终端渲染
    pub blocks_json: bool,
}

/// 一次运行的输出
#[derive(Debug, Clone)]
pub struct RunReport {
    /// 用于屏幕展示的文本
    pub rendered: String,
    /// 导出文件路径
    pub artifact_path: Option<PathBuf>,
}

/// 应用主结构
pub struct App<G = LlmService> {
    config: Config,
    session: Session,
    normalizer: InputNormalizer,
    generator: G,
}

impl App<LlmService> {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        let generator = LlmService::new(&config);
        Self::with_generator(config, generator)
    }
}

impl<G: SolutionGenerator> App<G> {
    /// 使用自定义生成器初始化
    pub fn with_generator(config: Config, generator: G) -> Result<Self> {
        init_log_file(&config.output_log_file)?;
        log_startup(&config);

        let session = Session::new(OutputFormat::default(), config.default_font);

        Ok(Self {
            config,
            session,
            normalizer: InputNormalizer::new(),
            generator,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// 运行一次完整流程
    pub async fn run(&self, request: RunRequest) -> Result<RunReport> {
        match &request.text {
            Some(text) => {
                if !request.files.is_empty() {
                    warn!("⚠️  已直接输入题目文本，忽略 {} 个文件", request.files.len());
                }
                self.session.set_assignment_text(text.as_str());
            }
            None if !request.files.is_empty() => {
                self.session.load_files(&self.normalizer, &request.files).await;
            }
            None => {}
        }
        if let Some(error) = self.session.snapshot().error {
            self.record("失败", &error);
            bail!(error);
        }

        self.session.set_format(request.format);
        self.session
            .set_font(request.font.unwrap_or(self.config.default_font));

        match self.session.generate(&self.generator).await {
            GenerateOutcome::Completed => {}
            GenerateOutcome::Busy => bail!("已有生成在进行中"),
            GenerateOutcome::Rejected | GenerateOutcome::Failed => {
                let error = self
                    .session
                    .snapshot()
                    .error
                    .unwrap_or_else(|| crate::workflow::GENERIC_FAILURE_MESSAGE.to_string());
                self.record("失败", &error);
                bail!(error);
            }
        }

        let snapshot = self.session.snapshot();
        let result = snapshot.result.context("生成完成但没有解答")?;

        let rendered = if request.blocks_json && result.format() == OutputFormat::Word {
            serde_json::to_string_pretty(&classify(result.text()))?
        } else if request.blocks_json {
            serde_json::to_string_pretty(&result)?
        } else {
            self.session.render(true).unwrap_or_default()
        };

        let artifact_path = if request.export {
            match self.session.export() {
                Some(artifact) => Some(write_artifact(
                    &artifact,
                    std::path::Path::new(&self.config.output_dir),
                )?),
                None => {
                    warn!("⚠️ 解答为空，跳过导出");
                    None
                }
            }
        } else {
            None
        };

        let detail = format!(
            "{} | {} 字符 | {}",
            result.format(),
            result.text().chars().count(),
            artifact_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "未导出".to_string())
        );
        self.record("成功", &detail);
        info!("✅ 完成");

        Ok(RunReport {
            rendered,
            artifact_path,
        })
    }

    fn record(&self, status: &str, detail: &str) {
        if let Err(e) = append_log_entry(&self.config.output_log_file, status, detail) {
            warn!("写入会话日志失败: {}", e);
        }
    }
}
