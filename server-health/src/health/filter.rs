//! フィールドフィルタ
//!
//! `status,env.nodeEnv` のようなカンマ区切りのドット記法パスで
//! ステータスドキュメントの一部だけを取り出す。
//!
//! - 各パスは常にフィルタ前のドキュメントに対して評価する
//! - 存在しないパスがあれば最初の1件で`BadRequest`を返す
//! - 値が`null`でもキーが存在すればパスは有効

use crate::common::error::{HealthError, HealthResult};
use serde_json::{Map, Value};

/// パース済みのフィルタパス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPath {
    raw: String,
    segments: Vec<String>,
}

impl FilterPath {
    /// ドット区切りの文字列をパースする
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            segments: raw.split('.').map(str::to_string).collect(),
        }
    }

    /// 元の文字列
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// キーの列
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// ドキュメント内の値を参照する
    pub fn lookup<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(document, |current, key| current.as_object()?.get(key))
    }
}

/// カンマ区切りのフィルタ文字列をパースする
pub fn parse_filter(filter: &str) -> Vec<FilterPath> {
    filter.split(',').map(FilterPath::parse).collect()
}

/// フィルタを適用する
///
/// `filter`が`None`または空文字列の場合はドキュメントをそのまま返す。
pub fn apply_filter(document: Value, filter: Option<&str>) -> HealthResult<Value> {
    let filter = match filter {
        Some(filter) if !filter.is_empty() => filter,
        _ => return Ok(document),
    };

    let mut filtered = Map::new();

    for path in parse_filter(filter) {
        let value = path
            .lookup(&document)
            .ok_or_else(|| HealthError::invalid_filter_path(path.as_str()))?;
        insert_at(&mut filtered, path.segments(), value.clone());
    }

    Ok(Value::Object(filtered))
}

/// 中間オブジェクトを作りながらパスの位置に値を設定する
fn insert_at(target: &mut Map<String, Value>, segments: &[String], value: Value) {
    let Some((key, rest)) = segments.split_first() else {
        return;
    };

    if rest.is_empty() {
        target.insert(key.clone(), value);
        return;
    }

    let entry = target
        .entry(key.clone())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    if let Value::Object(child) = entry {
        insert_at(child, rest, value);
    }
}
