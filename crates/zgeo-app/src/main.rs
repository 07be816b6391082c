//! ZGEO 事件脚本回放程序
//!
//! 用法：`zgeo [script.json]`，未给出路径时从标准输入读取。
//! 回放结束后把元素列表等状态以 JSON 输出到标准输出。

mod script;

use std::io::Read;

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use script::{Report, Script};

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {path}")),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read script from stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    // 初始化日志（输出到标准错误，标准输出只留给结果）
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(Level::INFO)
            .with_writer(std::io::stderr)
            .finish(),
    )?;

    info!("Starting ZGEO...");

    let path = std::env::args().nth(1);
    let text = read_input(path.as_deref())?;
    let script = Script::parse(&text).context("invalid script")?;

    let session = script.replay();
    let report = Report::from_session(&session);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
