// ABOUTME: Lists every file in a checkout as forward-slash relative paths.
// ABOUTME: Groups listed paths by parent directory for the file tree index.

use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Key used by [`file_tree_index`] for files directly under the checkout root.
pub const ROOT_KEY: &str = ".";

/// List every regular file under `root` as a forward-slash relative path.
///
/// Hidden files are included and ignore files are not honoured; only the
/// `.git` metadata directory is left out. Entries are visited in pre-order
/// with siblings sorted by name.
pub fn list_all_files(root: &Path) -> Vec<String> {
    if !root.is_dir() {
        return Vec::new();
    }

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .require_git(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| !(entry.depth() > 0 && entry.file_name() == ".git"))
        .build();

    let mut files = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                debug!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            files.push(normalize(relative));
        }
    }
    files
}

/// Group walked paths by parent directory, preserving walk order within each group.
pub fn file_tree_index(paths: &[String]) -> BTreeMap<String, Vec<String>> {
    let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for path in paths {
        let (dir, name) = match path.rsplit_once('/') {
            Some((dir, name)) => (dir.to_string(), name),
            None => (ROOT_KEY.to_string(), path.as_str()),
        };
        index.entry(dir).or_default().push(name.to_string());
    }
    index
}

fn normalize(relative: &Path) -> String {
    relative.to_string_lossy().replace('\\', "/")
}
