//! フィルタのプロパティテスト

use proptest::prelude::*;
use serde_json::{json, Value};
use server_health::health::filter::apply_filter;

fn document() -> Value {
    json!({
        "status": "ok",
        "uptime": 1.5,
        "upSince": "2024-01-01T00:00:00Z",
        "service": { "name": "svc", "description": "d", "version": "1.0.0" },
        "connections": { "db": "ok" },
        "env": { "nodeEnv": null, "pid": 1 },
        "git": { "commitHash": null, "branchName": null, "tag": null },
    })
}

const VALID_PATHS: &[&str] = &[
    "status",
    "uptime",
    "upSince",
    "service",
    "service.name",
    "service.version",
    "connections.db",
    "env.nodeEnv",
    "env.pid",
    "git.tag",
];

proptest! {
    /// 有効なパスだけなら、各パスの値が元ドキュメントと一致する
    #[test]
    fn valid_paths_copy_values(indices in prop::collection::vec(0..VALID_PATHS.len(), 1..6)) {
        let paths: Vec<&str> = indices.iter().map(|i| VALID_PATHS[*i]).collect();
        let filter = paths.join(",");
        let original = document();

        let filtered = apply_filter(original.clone(), Some(&filter)).unwrap();

        for path in &paths {
            let pointer = format!("/{}", path.replace('.', "/"));
            prop_assert_eq!(filtered.pointer(&pointer), original.pointer(&pointer));
        }
        let top_level: Vec<&str> = paths.iter().map(|p| p.split('.').next().unwrap()).collect();
        for key in filtered.as_object().unwrap().keys() {
            prop_assert!(top_level.contains(&key.as_str()));
        }
    }

    /// 存在しないキーを含めば必ずBadRequest
    #[test]
    fn unknown_key_is_rejected(key in "[a-z]{3,8}") {
        prop_assume!(document().get(&key).is_none());
        let filter = format!("status,{key}");

        let err = apply_filter(document(), Some(&filter)).unwrap_err();
        prop_assert_eq!(err.code(), "BadRequest");
        prop_assert_eq!(err.message(), format!("Invalid filter path \"{}\"", key));
    }
}
