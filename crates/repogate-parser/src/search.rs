// ABOUTME: Line-by-line literal substring search across the checkout.

use crate::walk::list_all_files;
use repogate_core::{RepoGateError, Result, SearchHit};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Case-sensitive literal substring search over every file in the checkout.
///
/// Files that cannot be read as UTF-8 text are skipped. `limit` caps the
/// number of hits; `None` returns all of them.
pub fn search(root: &Path, term: &str, limit: Option<usize>) -> Result<Vec<SearchHit>> {
    if term.is_empty() {
        return Err(RepoGateError::InvalidInput("Missing search term".into()));
    }

    let mut hits = Vec::new();
    for path in list_all_files(root) {
        let content = match fs::read_to_string(root.join(&path)) {
            Ok(content) => content,
            Err(_) => continue,
        };
        for (idx, line) in content.lines().enumerate() {
            if !line.contains(term) {
                continue;
            }
            hits.push(SearchHit {
                path: path.clone(),
                line: idx + 1,
                text: line.trim().to_string(),
            });
            if limit.is_some_and(|max| hits.len() >= max) {
                debug!(term, hits = hits.len(), "search result cap reached");
                return Ok(hits);
            }
        }
    }
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fixture() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "alpha\n  needle here  \nbeta\n").unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/b.md"), "Needle\nneedle again\n").unwrap();
        fs::write(dir.path().join("blob.bin"), [0xff, 0xfe, b'n', 0x00]).unwrap();
        dir
    }

    #[test]
    fn finds_trimmed_lines_in_walk_order() {
        let dir = fixture();
        let hits = search(dir.path(), "needle", None).unwrap();
        assert_eq!(
            hits,
            vec![
                SearchHit {
                    path: "a.txt".into(),
                    line: 2,
                    text: "needle here".into(),
                },
                SearchHit {
                    path: "docs/b.md".into(),
                    line: 2,
                    text: "needle again".into(),
                },
            ]
        );
    }

    #[test]
    fn limit_caps_hits() {
        let dir = fixture();
        let hits = search(dir.path(), "needle", Some(1)).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].path, "a.txt");
    }

    #[test]
    fn empty_term_is_rejected() {
        let dir = fixture();
        let err = search(dir.path(), "", None).unwrap_err();
        assert!(matches!(err, RepoGateError::InvalidInput(ref m) if m == "Missing search term"));
    }

    #[test]
    fn no_match_is_empty() {
        let dir = fixture();
        assert!(search(dir.path(), "zzz", None).unwrap().is_empty());
    }
}
