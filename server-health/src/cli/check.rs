//! check サブコマンド
//!
//! 起動中のヘルスエンドポイントに問い合わせ、JSONを表示します。

use clap::Args;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// check サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Health endpoint URL
    #[arg(short, long, default_value = "http://127.0.0.1:8080/health")]
    pub url: String,

    /// Comma-separated property paths to keep (e.g. status,env.nodeEnv)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

/// 問い合わせ結果
#[derive(Debug)]
pub struct CheckOutcome {
    /// HTTPステータス
    pub status: StatusCode,
    /// レスポンスボディ（JSONでなければ文字列として保持）
    pub body: Value,
}

impl CheckOutcome {
    /// 200ならtrue
    pub fn is_healthy(&self) -> bool {
        self.status == StatusCode::OK
    }
}

/// リクエストを送り、ステータスとボディを受け取る
pub async fn fetch(args: &CheckArgs) -> Result<CheckOutcome, anyhow::Error> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()?;

    let mut request = client.get(&args.url);
    if let Some(filter) = &args.filter {
        request = request.query(&[("filter", filter)]);
    }

    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;
    let body = serde_json::from_str(&text).unwrap_or(Value::String(text));

    Ok(CheckOutcome { status, body })
}

/// check サブコマンドを実行する
///
/// エンドポイントが正常（200）を返したかを返す。
pub async fn execute(args: &CheckArgs) -> Result<bool, anyhow::Error> {
    let outcome = fetch(args).await?;
    println!("{}", serde_json::to_string_pretty(&outcome.body)?);
    if !outcome.is_healthy() {
        eprintln!("HTTP {}", outcome.status);
    }
    Ok(outcome.is_healthy())
}
