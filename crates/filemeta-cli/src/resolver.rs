//! Host resolution
//!
//! Decides for each configured host whether its files are listed from the
//! local filesystem or through a remote session.

use crate::config::{HostEntry, LOCAL_HOST_ID};
use crate::error::Result;
use crate::lister::{FileLister, LocalLister, RemoteLister};
use crate::session::{RemoteSession, SessionParams};
use async_trait::async_trait;
use tracing::debug;

/// Picks the [`FileLister`] for a host entry (dependency injection point
/// for the aggregator)
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn resolve(&self, host_id: &str, entry: &HostEntry) -> Result<Box<dyn FileLister>>;
}

/// Resolves against the current machine's hostname, opening ssh sessions for
/// everything that is not local
#[derive(Debug, Clone)]
pub struct SystemHostResolver {
    local_hostname: String,
}

impl SystemHostResolver {
    pub fn new(local_hostname: impl Into<String>) -> Self {
        Self {
            local_hostname: local_hostname.into(),
        }
    }

    /// Resolver for the machine this process runs on
    pub fn from_system() -> Self {
        Self::new(local_hostname())
    }

    pub fn local_hostname(&self) -> &str {
        &self.local_hostname
    }
}

#[async_trait]
impl HostResolver for SystemHostResolver {
    async fn resolve(&self, host_id: &str, entry: &HostEntry) -> Result<Box<dyn FileLister>> {
        if is_local(host_id, entry, &self.local_hostname) {
            debug!(host = %host_id, "Using local listing");
            return Ok(Box::new(LocalLister::new()));
        }

        let params = SessionParams::from_entry(host_id, entry)?;
        let session = RemoteSession::connect(params).await?;
        Ok(Box::new(RemoteLister::new(session)))
    }
}

/// A host is local when it is the `local` entry or one of its aliases is
/// this machine's hostname
pub fn is_local(host_id: &str, entry: &HostEntry, local_hostname: &str) -> bool {
    host_id == LOCAL_HOST_ID || entry.aliases().iter().any(|alias| alias == local_hostname)
}

/// Hostname of the current machine, empty when it cannot be read
pub fn local_hostname() -> String {
    hostname::get()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
