//! Remote shell sessions
//!
//! Remote hosts are reached through the system `ssh` client. Unknown host
//! keys are accepted on first contact and no password prompts are allowed,
//! so a host must be reachable with the configured key or the user's agent.

use crate::config::{expand_home, HostEntry};
use crate::error::{CliError, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tracing::debug;

/// Remote shell client binary
pub const SSH_PROGRAM: &str = "ssh";

/// Connection parameters for one remote host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionParams {
    pub host: String,
    pub user: String,
    pub port: u16,
    pub key: Option<PathBuf>,
}

impl SessionParams {
    /// Connection parameters from a host entry; `host` and `user` are required
    pub fn from_entry(host_id: &str, entry: &HostEntry) -> Result<Self> {
        let host = entry.host.clone().ok_or_else(|| {
            CliError::invalid_config(format!("host '{}' has no 'host' address", host_id))
        })?;
        let user = entry.user.clone().ok_or_else(|| {
            CliError::invalid_config(format!("host '{}' has no 'user'", host_id))
        })?;

        Ok(Self {
            host,
            user,
            port: entry.port(),
            key: entry.key.as_deref().map(expand_home),
        })
    }

    /// `user@host`
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }
}

/// An authenticated connection to one remote machine
#[derive(Debug, Clone)]
pub struct RemoteSession {
    params: SessionParams,
    program: PathBuf,
}

impl RemoteSession {
    /// Open a session and check that a no-op command succeeds
    pub async fn connect(params: SessionParams) -> Result<Self> {
        let session = Self {
            params,
            program: PathBuf::from(SSH_PROGRAM),
        };
        session.verify().await?;
        Ok(session)
    }

    pub fn host(&self) -> &str {
        &self.params.host
    }

    /// Client arguments that run `remote_command` on the host
    pub fn ssh_args(&self, remote_command: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-p".into(),
            self.params.port.to_string().into(),
            "-o".into(),
            "BatchMode=yes".into(),
            "-o".into(),
            "StrictHostKeyChecking=accept-new".into(),
        ];
        if let Some(ref key) = self.params.key {
            args.push("-i".into());
            args.push(key.clone().into_os_string());
        }
        args.push(self.params.destination().into());
        args.push(remote_command.into());
        args
    }

    /// Start `remote_command` with stdout and stderr piped back
    pub fn exec(&self, remote_command: &str) -> Result<Child> {
        debug!(host = %self.host(), command = %remote_command, "Executing remote command");
        Command::new(&self.program)
            .args(self.ssh_args(remote_command))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                CliError::remote_query(
                    self.host(),
                    format!("failed to start {}: {}", self.program.display(), e),
                )
            })
    }

    async fn verify(&self) -> Result<()> {
        debug!(
            host = %self.params.host,
            user = %self.params.user,
            port = self.params.port,
            "Opening remote session"
        );
        let output = Command::new(&self.program)
            .args(self.ssh_args("true"))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                CliError::remote_session(
                    self.host(),
                    format!("failed to start {}: {}", self.program.display(), e),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("{} exited with {}", self.program.display(), output.status),
                reason => reason.to_string(),
            };
            return Err(CliError::remote_session(self.host(), message));
        }

        Ok(())
    }
}
