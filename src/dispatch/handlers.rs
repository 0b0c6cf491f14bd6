//! Concrete action handlers.
//!
//! Every process-spawning handler is fire-and-forget: it calls
//! `Command::spawn` and returns without waiting, so a wedged external
//! program cannot stall frame processing. The default set mirrors the
//! macOS desktop actions the daemon ships with; `ScriptHandler` covers
//! user-supplied scripts.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use super::handler::ActionHandler;
use super::registry::ActionRegistry;
use super::ActionId;

/// Launches a desktop application via a fixed command line.
pub struct AppLaunchHandler {
    name: &'static str,
    program: String,
    args: Vec<String>,
}

impl AppLaunchHandler {
    pub fn new(name: &'static str, program: &str, args: &[&str]) -> Self {
        Self {
            name,
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// `open -a <app>` launcher for a named macOS application.
    pub fn macos_app(name: &'static str, app: &str) -> Self {
        Self::new(name, "open", &["-a", app])
    }
}

impl ActionHandler for AppLaunchHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn invoke(&mut self) -> Result<String> {
        spawn_detached(&self.program, &self.args)
            .with_context(|| format!("failed to launch {}", self.name))?;
        Ok(format!("launched {}", self.name))
    }
}

/// Captures the screen to a timestamped file on the desktop.
pub struct ScreenshotHandler {
    output_dir: Option<PathBuf>,
}

impl ScreenshotHandler {
    pub fn new() -> Self {
        Self { output_dir: None }
    }

    /// Override the output directory (default: `$HOME/Desktop`).
    pub fn with_output_dir(dir: PathBuf) -> Self {
        Self {
            output_dir: Some(dir),
        }
    }

    fn output_path(&self) -> Result<PathBuf> {
        let dir = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => {
                let home = std::env::var("HOME").context("HOME is not set")?;
                PathBuf::from(home).join("Desktop")
            }
        };
        let epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock before epoch")?
            .as_secs();
        Ok(dir.join(format!("screenshot_{}.png", epoch)))
    }
}

impl Default for ScreenshotHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionHandler for ScreenshotHandler {
    fn name(&self) -> &'static str {
        "screenshot"
    }

    fn invoke(&mut self) -> Result<String> {
        let path = self.output_path()?;
        let path_arg = path.to_string_lossy().to_string();
        spawn_detached("screencapture", &[path_arg])
            .context("failed to start screen capture")?;
        Ok(format!("screenshot -> {}", path.display()))
    }
}

/// Runs a user-named script.
pub struct ScriptHandler {
    name: &'static str,
    path: PathBuf,
}

impl ScriptHandler {
    pub fn new(name: &'static str, path: PathBuf) -> Self {
        Self { name, path }
    }
}

impl ActionHandler for ScriptHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn invoke(&mut self) -> Result<String> {
        let path_arg = self.path.to_string_lossy().to_string();
        spawn_detached::<&str>(&path_arg, &[])
            .with_context(|| format!("failed to run script {}", self.path.display()))?;
        Ok(format!("ran {}", self.path.display()))
    }
}

/// Recording handler for tests and dry runs: counts invocations, touches
/// nothing on the host.
#[derive(Clone)]
pub struct StubHandler {
    name: &'static str,
    invocations: Arc<AtomicUsize>,
    fail_with: Option<String>,
}

impl StubHandler {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            invocations: Arc::new(AtomicUsize::new(0)),
            fail_with: None,
        }
    }

    /// A stub whose every invocation fails with `error`.
    pub fn failing(name: &'static str, error: &str) -> Self {
        Self {
            name,
            invocations: Arc::new(AtomicUsize::new(0)),
            fail_with: Some(error.to_string()),
        }
    }

    /// Times this handler has been invoked. Clones share the counter.
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

impl ActionHandler for StubHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn invoke(&mut self) -> Result<String> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(error) => Err(anyhow::anyhow!("{}", error)),
            None => Ok("stub invoked".to_string()),
        }
    }
}

fn spawn_detached<S: AsRef<std::ffi::OsStr>>(program: &str, args: &[S]) -> Result<()> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to spawn {}", program))?;
    Ok(())
}

/// The shipped macOS action set: gallery, notes, calendar, screenshot, and
/// the AppleScript Music toggle.
pub fn default_registry() -> ActionRegistry {
    let mut registry = ActionRegistry::new();
    registry.register(
        ActionId::OpenPhotos,
        AppLaunchHandler::macos_app("photos", "Photos"),
    );
    registry.register(
        ActionId::OpenNotes,
        AppLaunchHandler::macos_app("notes", "Notes"),
    );
    registry.register(
        ActionId::OpenCalendar,
        AppLaunchHandler::macos_app("calendar", "Calendar"),
    );
    registry.register(ActionId::TakeScreenshot, ScreenshotHandler::new());
    registry.register(
        ActionId::TurnMusic,
        AppLaunchHandler::new(
            "music",
            "osascript",
            &["-e", "tell application \"Music\" to activate"],
        ),
    );
    registry
}
