//! File discovery
//!
//! A [`FileLister`] turns a set of root directories into a flat list of file
//! path strings. [`LocalLister`] walks the local filesystem; [`RemoteLister`]
//! runs `find` over a [`RemoteSession`](crate::session::RemoteSession).

pub mod local;
pub mod remote;

pub use local::LocalLister;
pub use remote::RemoteLister;

use crate::error::Result;
use async_trait::async_trait;

/// Lists regular files below a set of roots
#[async_trait]
pub trait FileLister: Send + Sync {
    /// Every regular file under `roots`, optionally filtered by suffix
    ///
    /// An empty `exts` keeps all files. Suffix matching is case-sensitive.
    async fn list_files(&self, roots: &[String], exts: &[String]) -> Result<Vec<String>>;

    /// Short label for logs
    fn kind(&self) -> &'static str;
}

/// Whether a file name passes the suffix filter
pub fn matches_exts(file_name: &str, exts: &[String]) -> bool {
    exts.is_empty() || exts.iter().any(|ext| file_name.ends_with(ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_exts_empty_keeps_all() {
        assert!(matches_exts("anything.txt", &[]));
    }

    #[test]
    fn test_matches_exts_suffix_case_sensitive() {
        let exts = vec![".fastq".to_string(), ".bam".to_string()];
        assert!(matches_exts("S1_R1.fastq", &exts));
        assert!(matches_exts("S1.bam", &exts));
        assert!(!matches_exts("S1_R1.FASTQ", &exts));
        assert!(!matches_exts("S1_R1.fastq.gz", &exts));
    }
}
