//! Host-by-host collection and classification
//!
//! Hosts are processed one after another in configuration order. The first
//! failure to resolve or list a host aborts the whole run; there is no
//! partial result.

use crate::config::HostsConfig;
use crate::error::Result;
use crate::report::FilemetaTable;
use crate::resolver::HostResolver;
use filemeta_common::classify::classify;
use tracing::info;

/// Every file path on every configured host, concatenated in host order
pub async fn collect_paths(config: &HostsConfig, resolver: &dyn HostResolver) -> Result<Vec<String>> {
    let mut fpaths = Vec::new();

    for (host_id, entry) in config.hosts() {
        info!(host = %host_id, "Parsing fpaths from \"{}\" ...", host_id);
        let lister = resolver.resolve(host_id, entry).await?;
        let found = lister.list_files(&entry.paths, entry.exts()).await?;
        info!(host = %host_id, kind = lister.kind(), files = found.len(), "Listed host");
        fpaths.extend(found);
    }

    Ok(fpaths)
}

/// Classify every path into one report row
pub fn aggregate(fpaths: Vec<String>) -> FilemetaTable {
    info!("Aggregating fpaths ({}) ...", fpaths.len());
    fpaths.iter().map(|path| classify(path)).collect::<Vec<_>>().into()
}

/// Collect from all hosts and classify
pub async fn parse_filemeta(config: &HostsConfig, resolver: &dyn HostResolver) -> Result<FilemetaTable> {
    Ok(aggregate(collect_paths(config, resolver).await?))
}
