//! Keep the display awake by holding a platform inhibitor process.
//!
//! - macOS: `caffeinate -d -i`
//! - Linux: `systemd-inhibit ... sleep infinity`
//!
//! The hold lasts as long as the child process; releasing kills it.

use std::io::ErrorKind;
use std::process::{Child, Command, Stdio};

use tracing::debug;

use crate::core::StayAwake;
use crate::error::CohereError;

/// Stay-awake hold backed by a child process.
#[derive(Debug, Default)]
pub struct ProcessInhibitor {
    child: Option<Child>,
}

impl ProcessInhibitor {
    /// Create an inhibitor that holds nothing yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { child: None }
    }

    /// Command that blocks display sleep for as long as it runs.
    fn command() -> Option<Command> {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("caffeinate");
            cmd.arg("-d").arg("-i");
            Some(cmd)
        } else if cfg!(target_os = "linux") {
            let mut cmd = Command::new("systemd-inhibit");
            cmd.arg("--what=idle:sleep")
                .arg("--who=cohere")
                .arg("--why=Breathing session in progress")
                .arg("--mode=block")
                .arg("sleep")
                .arg("infinity");
            Some(cmd)
        } else {
            None
        }
    }

    /// Whether a hold is currently taken.
    #[must_use]
    pub const fn is_held(&self) -> bool {
        self.child.is_some()
    }
}

impl StayAwake for ProcessInhibitor {
    fn acquire(&mut self) -> Result<(), CohereError> {
        if self.child.is_some() {
            return Ok(());
        }

        let mut cmd = Self::command().ok_or_else(|| {
            CohereError::NotSupported("no stay-awake facility on this platform".to_string())
        })?;

        let child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CohereError::NotSupported(format!(
                    "stay-awake helper not installed: {e}"
                )),
                _ => CohereError::Io(e),
            })?;

        debug!(pid = child.id(), "stay-awake helper started");
        self.child = Some(child);
        Ok(())
    }

    fn release(&mut self) -> Result<(), CohereError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        // The helper may already have exited on its own.
        if child.try_wait()?.is_none() {
            child.kill()?;
        }
        child.wait()?;
        debug!("stay-awake helper stopped");
        Ok(())
    }
}

impl Drop for ProcessInhibitor {
    fn drop(&mut self) {
        let _ = self.release();
    }
}
