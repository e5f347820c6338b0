//! [`WindowManager`] implementation backed by `bspc`.
//!
//! Every operation runs one short-lived `bspc` child process and waits for
//! it.  Queries read its stdout line by line; commands only check the exit
//! status.

use crate::traits::WindowManager;
use log::trace;
use std::ffi::OsString;
use std::process::Command;

/// bspwm-backed window manager.
pub struct BspcWm {
    program: OsString,
}

/// Errors that can occur when talking to bspwm.
#[derive(Debug, thiserror::Error)]
#[error("bspc error: {0}")]
pub struct BspcError(String);

impl Default for BspcWm {
    fn default() -> Self {
        Self::new("bspc")
    }
}

impl BspcWm {
    /// Create a handle that runs `program` (usually `"bspc"`).
    ///
    /// Nothing is spawned until a method is called.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run `bspc <args>` and return its stdout.
    fn run(&self, args: &[&str]) -> Result<String, BspcError> {
        trace!("bspc {}", args.join(" "));
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| {
                BspcError(format!(
                    "failed to run {}: {}",
                    self.program.to_string_lossy(),
                    e
                ))
            })?;

        if output.status.success() {
            String::from_utf8(output.stdout).map_err(|e| BspcError(format!("utf-8: {}", e)))
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(BspcError(format!(
                "`{}` failed ({}): {}",
                args.join(" "),
                output.status,
                stderr.trim()
            )))
        }
    }

    /// Run a query and split its output into names.
    fn query(&self, args: &[&str]) -> Result<Vec<String>, BspcError> {
        self.run(args).map(|out| parse_names(&out))
    }
}

/// Split `bspc query` output into trimmed, non-empty lines.
fn parse_names(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

//  WindowManager implementation

impl WindowManager for BspcWm {
    type Error = BspcError;

    fn monitors(&self) -> Result<Vec<String>, Self::Error> {
        self.query(&["query", "-M", "--names"])
    }

    fn desktops(&self, monitor: &str) -> Result<Vec<String>, Self::Error> {
        self.query(&["query", "-D", "-m", monitor, "--names"])
    }

    fn add_desktop(&self, monitor: &str, desktop: &str) -> Result<(), Self::Error> {
        self.run(&["monitor", monitor, "-a", desktop]).map(drop)
    }

    fn move_desktop(&self, desktop: &str, monitor: &str) -> Result<(), Self::Error> {
        self.run(&["desktop", desktop, "-m", monitor]).map(drop)
    }

    fn remove_desktop(&self, desktop: &str) -> Result<(), Self::Error> {
        self.run(&["desktop", desktop, "-r"]).map(drop)
    }

    fn reorder_desktops(&self, monitor: &str, desktops: &[String]) -> Result<(), Self::Error> {
        let mut args = vec!["monitor", monitor, "-o"];
        args.extend(desktops.iter().map(String::as_str));
        self.run(&args).map(drop)
    }
}
