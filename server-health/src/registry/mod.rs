//! 接続チェック登録管理
//!
//! プローブをメモリ内で管理する

pub mod probes;

pub use probes::{Probe, ProbeRegistry, RegisterStatus};
