//! Remote listing with `find` over a remote session

use super::FileLister;
use crate::error::{CliError, Result};
use crate::session::RemoteSession;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Child;
use tracing::{debug, warn};

/// Lists files on the host behind a [`RemoteSession`]
#[derive(Debug, Clone)]
pub struct RemoteLister {
    session: RemoteSession,
}

impl RemoteLister {
    pub fn new(session: RemoteSession) -> Self {
        Self { session }
    }
}

#[async_trait]
impl FileLister for RemoteLister {
    async fn list_files(&self, roots: &[String], exts: &[String]) -> Result<Vec<String>> {
        let mut fpaths = Vec::new();

        for root in roots {
            let command = find_command(root, exts);
            let child = self.session.exec(&command)?;
            let found = collect_output(self.session.host(), child).await?;
            debug!(host = %self.session.host(), root = %root, files = found.len(), "Listed remote root");
            fpaths.extend(found);
        }

        Ok(fpaths)
    }

    fn kind(&self) -> &'static str {
        "remote"
    }
}

/// Quote a word for a POSIX shell
pub fn shell_quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', r"'\''"))
}

/// `find` invocation listing regular files under `root`, restricted to
/// names ending in one of `exts` when any are given
pub fn find_command(root: &str, exts: &[String]) -> String {
    let mut command = format!("find {} -type f", shell_quote(root));
    if !exts.is_empty() {
        let names = exts
            .iter()
            .map(|ext| format!("-name {}", shell_quote(&format!("*{}", ext))))
            .collect::<Vec<_>>()
            .join(" -o ");
        command.push_str(&format!(r" \( {} \)", names));
    }
    command
}

/// Collect stdout lines of `child` while stderr is drained on its own task
///
/// stderr lines are diagnostics only. Both pipes are read as bytes until end
/// of stream, so neither an undecodable line nor a full stderr buffer can
/// stop the child early. Bytes that are not UTF-8 are replaced, as the local
/// walk does. A non-zero exit status is logged and otherwise ignored.
pub async fn collect_output(host: &str, mut child: Child) -> Result<Vec<String>> {
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| CliError::remote_query(host, "stdout was not captured"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| CliError::remote_query(host, "stderr was not captured"))?;

    let stderr_host = host.to_string();
    let stderr_task = tokio::spawn(async move {
        let mut reader = BufReader::new(stderr);
        let mut line = Vec::new();
        let mut count = 0usize;
        loop {
            line.clear();
            match reader.read_until(b'\n', &mut line).await {
                Ok(0) => break,
                Ok(_) => {
                    warn!(host = %stderr_host, "{}", String::from_utf8_lossy(&line).trim());
                    count += 1;
                },
                Err(err) => {
                    warn!(host = %stderr_host, error = %err, "Failed to read remote stderr");
                    break;
                },
            }
        }
        count
    });

    let mut paths = Vec::new();
    let mut reader = BufReader::new(stdout);
    let mut line = Vec::new();
    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .await
            .map_err(|e| CliError::remote_query(host, format!("failed to read output: {}", e)))?;
        if read == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&line);
        let text = text.trim();
        if !text.is_empty() {
            paths.push(text.to_string());
        }
    }

    let diagnostics = stderr_task.await.map_err(|e| CliError::Other(e.into()))?;
    let status = child.wait().await?;
    if !status.success() {
        warn!(host = %host, status = %status, diagnostics, "Remote listing exited with failure status");
    }

    Ok(paths)
}
