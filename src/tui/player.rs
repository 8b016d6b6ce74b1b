//! # Player Surface
//!
//! Where a stream URL actually plays. The terminal can't render video, so the
//! surface is an external media player process (`mpv` unless configured
//! otherwise). There is at most one process; loading a new URL kills the old
//! one first.

use std::process::{Child, Command, Stdio};

use log::{debug, info, warn};

use crate::core::config::ResolvedConfig;
use crate::tui::platform::PlatformError;

pub trait PlayerSurface {
    /// Starts playing `url`, replacing anything already loaded.
    fn load(&mut self, url: &str) -> Result<(), PlatformError>;
    /// Stops playback and releases the surface. Safe to call when idle.
    fn teardown(&mut self);
    fn is_loaded(&self) -> bool;
}

pub struct ExternalPlayer {
    command: String,
    args: Vec<String>,
    child: Option<Child>,
}

impl ExternalPlayer {
    /// An empty `command` disables playback.
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            child: None,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.player_command.clone(), config.player_args.clone())
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl PlayerSurface for ExternalPlayer {
    fn load(&mut self, url: &str) -> Result<(), PlatformError> {
        self.teardown();
        if self.command.trim().is_empty() {
            return Err(PlatformError::Unavailable("media player"));
        }

        let child = Command::new(&self.command)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| PlatformError::Spawn {
                program: self.command.clone(),
                source,
            })?;

        info!("Started {} (pid {}) for {}", self.command, child.id(), url);
        self.child = Some(child);
        Ok(())
    }

    fn teardown(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        match child.try_wait() {
            Ok(Some(status)) => debug!("{} already exited: {}", self.command, status),
            _ => {
                if let Err(e) = child.kill() {
                    warn!("Failed to stop {}: {}", self.command, e);
                }
                let _ = child.wait();
                info!("Stopped {}", self.command);
            }
        }
    }

    fn is_loaded(&self) -> bool {
        self.child.is_some()
    }
}

impl Drop for ExternalPlayer {
    fn drop(&mut self) {
        self.teardown();
    }
}
