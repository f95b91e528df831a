use anyhow::Result;
use assignment_solver::{logger, App, Config, FontChoice, OutputFormat, RunRequest};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "作业解答助手", long_about = None)]
#[command(group(ArgGroup::new("input").required(true).multiple(false).args(["text", "files"])))]
struct Args {
    /// 题目文件（.txt / .md / .py / .doc / .docx），多个时只读取第一个
    files: Vec<PathBuf>,

    /// 直接输入题目文本
    #[arg(long, short)]
    text: Option<String>,

    /// 输出格式：python 或 word
    #[arg(long, short, default_value = "python")]
    format: OutputFormat,

    /// Word 导出字体：arial 或 times（默认取配置）
    #[arg(long)]
    font: Option<FontChoice>,

    /// 导出目录（覆盖 OUTPUT_DIR）
    #[arg(long)]
    out: Option<String>,

    /// 以 JSON 输出分类后的块
    #[arg(long, default_value_t = false)]
    blocks_json: bool,

    /// 不写出导出文件
    #[arg(long, default_value_t = false)]
    no_export: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 加载配置
    let mut config = Config::load()?;
    if let Some(out) = args.out {
        config.output_dir = out;
    }

    // 初始化日志
    logger::init(config.verbose_logging);

    let app = App::initialize(config)?;
    let report = app
        .run(RunRequest {
            text: args.text,
            files: args.files,
            format: args.format,
            font: args.font,
            export: !args.no_export,
            blocks_json: args.blocks_json,
        })
        .await?;

    println!("{}", report.rendered);

    Ok(())
}
