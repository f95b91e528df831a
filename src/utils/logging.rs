//! 日志工具模块
//!
//! 提供会话日志文件和日志格式化的辅助函数

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;

use crate::config::Config;

/// 初始化日志文件
///
/// 文件不存在时写入带时间戳的标题，已存在则保留之前的记录
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    if std::path::Path::new(log_file_path).exists() {
        return Ok(());
    }

    let log_header = format!(
        "{}\n作业解答日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法创建日志文件: {}", log_file_path))?;
    Ok(())
}

/// 追加一条会话记录
///
/// # 参数
/// - `log_file_path`: 日志文件路径
/// - `status`: 结果状态（成功 / 失败 / 跳过）
/// - `detail`: 详细信息
pub fn append_log_entry(log_file_path: &str, status: &str, detail: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .with_context(|| format!("无法打开日志文件: {}", log_file_path))?;

    writeln!(
        file,
        "[{}] {} | {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        status,
        detail
    )?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 作业解答助手启动");
    info!("🤖 模型: {}", config.llm_model_name);
    info!("📁 输出目录: {}", config.output_dir);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
