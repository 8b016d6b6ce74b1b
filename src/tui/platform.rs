//! # Platform Integration
//!
//! Clipboard and "open in another application" through the OS command-line
//! tools. Each is tried in order until one can be spawned.
//!
//! | OS      | clipboard                         | open URL          |
//! |---------|-----------------------------------|-------------------|
//! | macOS   | `pbcopy`                          | `open`            |
//! | Windows | `clip`                            | `cmd /C start`    |
//! | other   | `wl-copy`, `xclip`, `xsel`        | `xdg-open`        |
//!
//! Openers may stay in the foreground until the browser closes
//! (`xdg-open` with `$BROWSER`), so they are spawned and reaped on a
//! separate thread. A late failure comes back as `Action::Notify`.

use std::fmt;
use std::io::{ErrorKind, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;

use log::{debug, info, warn};

use crate::core::action::Action;

#[derive(Debug)]
pub enum PlatformError {
    /// None of the candidate tools is installed (or the feature is disabled).
    Unavailable(&'static str),
    Spawn {
        program: String,
        source: std::io::Error,
    },
    Exit {
        program: String,
        status: ExitStatus,
    },
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Unavailable(what) => write!(f, "no {what} available"),
            PlatformError::Spawn { program, source } => {
                write!(f, "failed to run {program}: {source}")
            }
            PlatformError::Exit { program, status } => write!(f, "{program} exited with {status}"),
        }
    }
}

impl std::error::Error for PlatformError {}

/// What the TUI needs from the host system.
pub trait Platform {
    fn copy_to_clipboard(&self, text: &str) -> Result<(), PlatformError>;
    fn open_url(&self, url: &str) -> Result<(), PlatformError>;
}

/// A program plus its fixed arguments.
type Tool = (&'static str, &'static [&'static str]);

#[cfg(target_os = "macos")]
const CLIPBOARD_TOOLS: &[Tool] = &[("pbcopy", &[])];
#[cfg(target_os = "windows")]
const CLIPBOARD_TOOLS: &[Tool] = &[("clip", &[])];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CLIPBOARD_TOOLS: &[Tool] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

#[cfg(target_os = "macos")]
const OPEN_TOOLS: &[Tool] = &[("open", &[])];
#[cfg(target_os = "windows")]
const OPEN_TOOLS: &[Tool] = &[("cmd", &["/C", "start", ""])];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPEN_TOOLS: &[Tool] = &[("xdg-open", &[])];

/// Uses whatever clipboard/open tools the OS provides.
#[derive(Debug, Default, Clone)]
pub struct SystemPlatform {
    /// Where opener failures detected after `open_url` returned are posted.
    notify: Option<mpsc::Sender<Action>>,
}

impl SystemPlatform {
    pub fn new(notify: mpsc::Sender<Action>) -> Self {
        Self {
            notify: Some(notify),
        }
    }
}

impl Platform for SystemPlatform {
    fn copy_to_clipboard(&self, text: &str) -> Result<(), PlatformError> {
        for (program, args) in CLIPBOARD_TOOLS {
            match pipe_to(program, args, text) {
                Err(PlatformError::Spawn { source, .. }) if source.kind() == ErrorKind::NotFound => {
                    debug!("{} not installed, trying next clipboard tool", program);
                }
                Ok(()) => {
                    info!("Copied {} bytes to clipboard via {}", text.len(), program);
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
        Err(PlatformError::Unavailable("clipboard tool"))
    }

    fn open_url(&self, url: &str) -> Result<(), PlatformError> {
        for (program, args) in OPEN_TOOLS {
            match spawn_opener(program, args, url, self.notify.clone()) {
                Err(PlatformError::Spawn { source, .. }) if source.kind() == ErrorKind::NotFound => {
                    debug!("{} not installed, trying next opener", program);
                }
                Ok(()) => {
                    info!("Opening {} via {}", url, program);
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
        Err(PlatformError::Unavailable("URL opener"))
    }
}

/// Starts `program args... url` without waiting for it to exit.
fn spawn_opener(
    program: &str,
    args: &[&str],
    url: &str,
    notify: Option<mpsc::Sender<Action>>,
) -> Result<(), PlatformError> {
    let child = Command::new(program)
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| PlatformError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let program = program.to_string();
    thread::Builder::new()
        .name("opener-reaper".to_string())
        .spawn(move || reap_opener(program, child, notify))
        .map(|_| ())
        .map_err(|source| PlatformError::Spawn {
            program: "opener reaper thread".to_string(),
            source,
        })
}

fn reap_opener(program: String, mut child: Child, notify: Option<mpsc::Sender<Action>>) {
    let error = match child.wait() {
        Ok(status) if status.success() => {
            debug!("{} exited cleanly", program);
            return;
        }
        Ok(status) => PlatformError::Exit { program, status },
        Err(source) => PlatformError::Spawn { program, source },
    };
    warn!("Open failed: {}", error);
    if let Some(tx) = notify
        && tx
            .send(Action::Notify(format!("Could not open link: {error}")))
            .is_err()
    {
        warn!("Failed to post opener failure: receiver dropped");
    }
}

/// Runs `program args...` with `input` on stdin and waits for it.
fn pipe_to(program: &str, args: &[&str], input: &str) -> Result<(), PlatformError> {
    let spawn_err = |source| PlatformError::Spawn {
        program: program.to_string(),
        source,
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(spawn_err)?;

    if let Some(mut stdin) = child.stdin.take()
        && let Err(e) = stdin.write_all(input.as_bytes())
    {
        warn!("Failed writing to {}: {}", program, e);
        let _ = child.kill();
        let _ = child.wait();
        return Err(spawn_err(e));
    }

    let status = child.wait().map_err(spawn_err)?;
    if status.success() {
        Ok(())
    } else {
        Err(PlatformError::Exit {
            program: program.to_string(),
            status,
        })
    }
}
