use std::{env, process::Command};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=RUSTC");

    println!(
        "cargo:rustc-env=SERVER_HEALTH_RUSTC_VERSION={}",
        rustc_version().unwrap_or_else(|| "unknown".to_string())
    );
}

/// `rustc --version` の出力からバージョン番号のみを取り出す
///
/// 例: `rustc 1.80.0 (051478957 2024-07-21)` → `v1.80.0`
fn rustc_version() -> Option<String> {
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let output = Command::new(rustc).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8(output.stdout).ok()?;
    stdout.split_whitespace().nth(1).map(|v| format!("v{}", v))
}
