//! Local filesystem listing

use super::{matches_exts, FileLister};
use crate::error::{CliError, Result};
use async_trait::async_trait;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Recursive walk of local directories
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalLister;

impl LocalLister {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileLister for LocalLister {
    async fn list_files(&self, roots: &[String], exts: &[String]) -> Result<Vec<String>> {
        let roots = roots.to_vec();
        let exts = exts.to_vec();

        tokio::task::spawn_blocking(move || walk_roots(&roots, &exts))
            .await
            .map_err(|e| CliError::Other(e.into()))
    }

    fn kind(&self) -> &'static str {
        "local"
    }
}

/// Walk each root in turn and collect matching regular files
///
/// Unreadable entries and missing roots are reported and skipped. Symlinks to
/// files are kept; symlinked directories are not descended into. A root that
/// is itself a file yields nothing.
pub fn walk_roots(roots: &[String], exts: &[String]) -> Vec<String> {
    let mut fpaths = Vec::new();

    for root in roots {
        let before = fpaths.len();
        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(root = %root, error = %err, "Skipping unreadable entry");
                    continue;
                },
            };

            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }

            if matches_exts(&entry.file_name().to_string_lossy(), exts) {
                fpaths.push(entry.path().to_string_lossy().into_owned());
            }
        }
        debug!(root = %root, files = fpaths.len() - before, "Listed local root");
    }

    fpaths
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "scrna/GEX_S1_L001_R1_001.fastq");
        touch(dir.path(), "scrna/GEX_S1_L001_R2_001.fastq.gz");
        touch(dir.path(), "atac/deep/A1_R1.FASTQ");
        touch(dir.path(), "notes.txt");
        fs::create_dir_all(dir.path().join("empty")).unwrap();
        dir
    }

    fn rel(dir: &TempDir, paths: Vec<String>) -> Vec<String> {
        let prefix = format!("{}/", dir.path().display());
        paths
            .into_iter()
            .map(|p| p.strip_prefix(&prefix).unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_walk_all_files() {
        let dir = fixture();
        let root = dir.path().display().to_string();
        let files = rel(&dir, walk_roots(&[root], &[]));
        assert_eq!(
            files,
            vec![
                "atac/deep/A1_R1.FASTQ",
                "notes.txt",
                "scrna/GEX_S1_L001_R1_001.fastq",
                "scrna/GEX_S1_L001_R2_001.fastq.gz",
            ]
        );
    }

    #[test]
    fn test_walk_extension_filter_is_exact_suffix() {
        let dir = fixture();
        let root = dir.path().display().to_string();
        let files = rel(&dir, walk_roots(&[root], &[".fastq".to_string()]));
        assert_eq!(files, vec!["scrna/GEX_S1_L001_R1_001.fastq"]);
    }

    #[test]
    fn test_walk_multiple_roots_in_order() {
        let dir = fixture();
        let roots = vec![
            dir.path().join("scrna").display().to_string(),
            dir.path().join("atac").display().to_string(),
        ];
        let files = rel(&dir, walk_roots(&roots, &[]));
        assert_eq!(files.len(), 3);
        assert!(files[0].starts_with("scrna/"));
        assert!(files[2].starts_with("atac/"));
    }

    #[test]
    fn test_walk_missing_root_is_skipped() {
        let dir = fixture();
        let roots = vec![
            dir.path().join("does-not-exist").display().to_string(),
            dir.path().join("atac").display().to_string(),
        ];
        let files = rel(&dir, walk_roots(&roots, &[]));
        assert_eq!(files, vec!["atac/deep/A1_R1.FASTQ"]);
    }

    #[test]
    fn test_walk_file_root_yields_nothing() {
        let dir = fixture();
        let root = dir.path().join("notes.txt").display().to_string();
        assert!(walk_roots(&[root], &[]).is_empty());
    }

    #[test]
    fn test_walk_duplicate_roots_duplicate_paths() {
        let dir = fixture();
        let root = dir.path().join("atac").display().to_string();
        let files = walk_roots(&[root.clone(), root], &[]);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0], files[1]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_keeps_file_symlinks_only() {
        let dir = fixture();
        let links = dir.path().join("links");
        fs::create_dir_all(&links).unwrap();
        std::os::unix::fs::symlink(dir.path().join("notes.txt"), links.join("notes-link.txt")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("scrna"), links.join("scrna-link")).unwrap();

        let files = rel(&dir, walk_roots(&[links.display().to_string()], &[]));
        assert_eq!(files, vec!["links/notes-link.txt"]);
    }

    #[tokio::test]
    async fn test_local_lister_trait() {
        let dir = fixture();
        let lister = LocalLister::new();
        let files = lister
            .list_files(&[dir.path().display().to_string()], &[".gz".to_string()])
            .await
            .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("GEX_S1_L001_R2_001.fastq.gz"));
        assert_eq!(lister.kind(), "local");
    }
}
