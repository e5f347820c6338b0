//! Types shared by the planner, the reconciler and the window-manager
//! backends.
//!
//! [`MonitorDesktops`] describes what the window manager currently shows and
//! [`Action`] describes a single step that moves it towards a layout.

use serde::Serialize;
use std::fmt;

/// A detected monitor together with the desktops it currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorDesktops {
    /// Name the window manager uses for this monitor (e.g. `"DP-1"`).
    pub monitor: String,
    /// Desktop names in the order the window manager reports them.
    pub desktops: Vec<String>,
}

impl MonitorDesktops {
    pub fn new(monitor: impl Into<String>, desktops: Vec<String>) -> Self {
        Self {
            monitor: monitor.into(),
            desktops,
        }
    }

    /// Whether `desktop` lives on this monitor.
    pub fn contains(&self, desktop: &str) -> bool {
        self.desktops.iter().any(|d| d == desktop)
    }
}

/// One reconciliation step against the window manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Add a new desktop named `desktop` at the end of `monitor`.
    Create { monitor: String, desktop: String },

    /// Send an existing desktop to the end of `monitor`.
    Move { desktop: String, monitor: String },

    /// Delete a desktop that no layout asks for.
    Remove { desktop: String },

    /// Put the desktops of `monitor` into the given order.
    Reorder { monitor: String, desktops: Vec<String> },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Create { monitor, desktop } => {
                write!(f, "create {} on {}", desktop, monitor)
            }
            Action::Move { desktop, monitor } => write!(f, "move {} to {}", desktop, monitor),
            Action::Remove { desktop } => write!(f, "remove {}", desktop),
            Action::Reorder { monitor, desktops } => {
                write!(f, "reorder {}: {}", monitor, desktops.join(" "))
            }
        }
    }
}
