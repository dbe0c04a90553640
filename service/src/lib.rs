pub mod infrastructure;
pub mod modules;
pub mod shared;

use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use modules::support::{ChatRequest, ProcessMessageCommand};
use modules::{ConfigService, SupportModule};
use shared::{AppError, AppResult};

/// 默认配置文件位置
pub const DEFAULT_CONFIG_PATH: &str = "data/config.json";

/// 初始化日志，`RUST_LOG` 未设置时为 info
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // 日志写到 stderr，stdout 只输出回复
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 一行输入
#[derive(Debug, Clone)]
pub enum InputLine {
    Message(ProcessMessageCommand),
    Trend { user: String },
}

/// 解析 `user<TAB>message[<TAB>lang[<TAB>region]]` 或 `/trend<TAB>user`
///
/// 没有 TAB 的行视为匿名用户的消息，空行返回 None
pub fn parse_line(line: &str) -> Option<InputLine> {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    if line.trim().is_empty() {
        return None;
    }

    let mut fields = line.split('\t');
    let first = fields.next()?;

    if first == "/trend" {
        let user = fields.next().unwrap_or("guest").trim();
        return Some(InputLine::Trend {
            user: user.to_string(),
        });
    }

    let (user, message) = match fields.next() {
        Some(message) => (first.trim(), message),
        None => ("guest", first),
    };

    let request = ChatRequest {
        message: message.to_string(),
        language: fields.next().map(str::to_string),
        region: fields.next().map(str::to_string),
    };

    Some(InputLine::Message(request.into_command(user)))
}

/// 从 stdin 逐行读取消息，每行输出一个 JSON 结果
pub async fn run(config_path: PathBuf) -> AppResult<()> {
    tracing::info!("Solace starting...");
    tracing::info!("Config file: {}", config_path.display());

    let config = ConfigService::from_file(config_path).load().await?;
    let module = SupportModule::from_config(&config).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let output = match parse_line(&line) {
            None => continue,
            Some(InputLine::Message(command)) => module
                .process_message(command)
                .await
                .map_err(AppError::from)
                .and_then(|reply| Ok(serde_json::to_string(&reply)?)),
            Some(InputLine::Trend { user }) => module
                .mood_trend(user, None)
                .await
                .map_err(AppError::from)
                .and_then(|points| Ok(serde_json::to_string(&points)?)),
        };

        match output {
            Ok(json) => println!("{}", json),
            Err(e) => {
                tracing::debug!("Request failed: {}", e);
                println!("{}", serde_json::json!({ "error": e }));
            }
        }
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}
