//! git情報の取得
//!
//! `git2`でリポジトリを探索し、HEADのコミット・ブランチ・タグを取得する。
//! リポジトリが見つからない、HEADが未作成などで読めない場合は空の[`GitInfo`]を返す。

use crate::common::types::GitInfo;
use git2::{Oid, Repository};
use std::path::Path;
use tracing::debug;

/// `start`から親方向にリポジトリを探し、HEADの情報を読む
pub fn discover(start: &Path) -> GitInfo {
    let repo = match Repository::discover(start) {
        Ok(repo) => repo,
        Err(e) => {
            debug!(path = %start.display(), error = %e, "No git repository found");
            return GitInfo::default();
        }
    };

    read_head(&repo).unwrap_or_else(|e| {
        debug!(path = %start.display(), error = %e, "Failed to read git HEAD");
        GitInfo::default()
    })
}

fn read_head(repo: &Repository) -> Result<GitInfo, git2::Error> {
    let head = repo.head()?;
    let branch_name = if head.is_branch() {
        head.shorthand().map(str::to_string)
    } else {
        None
    };
    let commit_id = head.peel_to_commit()?.id();

    Ok(GitInfo {
        commit_hash: Some(commit_id.to_string()),
        branch_name,
        tag: find_tag(repo, commit_id)?,
    })
}

/// コミットを指すタグのうち名前順で最初のもの（注釈付きタグはピールして比較）
fn find_tag(repo: &Repository, commit_id: Oid) -> Result<Option<String>, git2::Error> {
    let names = repo.tag_names(None)?;

    let mut tags: Vec<&str> = names
        .iter()
        .flatten()
        .filter(|name| {
            repo.revparse_single(&format!("refs/tags/{}", name))
                .and_then(|object| object.peel_to_commit())
                .map(|commit| commit.id() == commit_id)
                .unwrap_or(false)
        })
        .collect();

    tags.sort_unstable();
    Ok(tags.first().map(|name| name.to_string()))
}
