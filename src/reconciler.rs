//! The orchestrator that ties configuration, planning and the window manager
//! together.
//!
//! [`Reconciler`] queries the current monitors and desktops, selects the
//! matching [`Configuration`], plans the [`Action`]s and issues them through
//! the [`WindowManager`] trait.

use crate::config::{Config, Configuration, Options};
use crate::desktop::{Action, MonitorDesktops};
use crate::plan;
use crate::traits::WindowManager;
use log::{debug, info, warn};
use std::fmt;

/// Possible errors from the reconciler.  All of them abort the run.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// The window manager could not be queried.
    #[error("window manager error: {0}")]
    WindowManager(String),

    /// No configuration lists exactly the connected monitors.
    #[error("no configuration matches the connected monitors [{}]", .0.join(", "))]
    NoMatchingConfiguration(Vec<String>),
}

/// Outcome of [`Reconciler::apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    /// Actions the window manager accepted.
    pub applied: usize,
    /// Actions that failed and were skipped.
    pub failed: usize,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} applied, {} failed", self.applied, self.failed)
    }
}

/// Drives one reconciliation run against a window manager.
///
/// ```ignore
/// let reconciler = Reconciler::new(BspcWm::default(), config.options.clone());
/// let current = reconciler.detect()?;
/// let configuration = reconciler.select(&config, &current)?;
/// let actions = reconciler.plan(configuration, &current);
/// let report = reconciler.apply(&actions);
/// ```
pub struct Reconciler<W: WindowManager> {
    wm: W,
    options: Options,
}

impl<W: WindowManager> Reconciler<W> {
    pub fn new(wm: W, options: Options) -> Self {
        Self { wm, options }
    }

    /// Return a shared reference to the underlying window manager.
    pub fn wm(&self) -> &W {
        &self.wm
    }

    /// Query every connected monitor and the desktops it holds.
    pub fn detect(&self) -> Result<Vec<MonitorDesktops>, ReconcileError> {
        let monitors = self
            .wm
            .monitors()
            .map_err(|e| ReconcileError::WindowManager(e.to_string()))?;
        info!("found {} monitor(s): {}", monitors.len(), monitors.join(", "));

        monitors
            .into_iter()
            .map(|monitor| {
                let desktops = self
                    .wm
                    .desktops(&monitor)
                    .map_err(|e| ReconcileError::WindowManager(e.to_string()))?;
                debug!("{}: {}", monitor, desktops.join(" "));
                Ok(MonitorDesktops { monitor, desktops })
            })
            .collect()
    }

    /// Pick the configuration for the monitors in `current`.
    pub fn select<'c>(
        &self,
        config: &'c Config,
        current: &[MonitorDesktops],
    ) -> Result<&'c Configuration, ReconcileError> {
        let names: Vec<String> = current.iter().map(|m| m.monitor.clone()).collect();
        let configuration = config
            .active_configuration(&names)
            .ok_or(ReconcileError::NoMatchingConfiguration(names))?;
        info!("using configuration {:?}", configuration.name);
        Ok(configuration)
    }

    /// Compute the actions for `configuration` from `current`.
    pub fn plan(&self, configuration: &Configuration, current: &[MonitorDesktops]) -> Vec<Action> {
        let actions = plan::plan(current, configuration, &self.options);
        info!("{} action(s) planned", actions.len());
        actions
    }

    /// Issue every action in order.
    ///
    /// A failing action is logged and skipped; the rest still run.
    pub fn apply(&self, actions: &[Action]) -> Report {
        let mut report = Report::default();
        for action in actions {
            match self.execute(action) {
                Ok(()) => {
                    info!("{}", action);
                    report.applied += 1;
                }
                Err(e) => {
                    warn!("{} failed: {}", action, e);
                    report.failed += 1;
                }
            }
        }
        report
    }

    fn execute(&self, action: &Action) -> Result<(), W::Error> {
        match action {
            Action::Create { monitor, desktop } => self.wm.add_desktop(monitor, desktop),
            Action::Move { desktop, monitor } => self.wm.move_desktop(desktop, monitor),
            Action::Remove { desktop } => self.wm.remove_desktop(desktop),
            Action::Reorder { monitor, desktops } => self.wm.reorder_desktops(monitor, desktops),
        }
    }
}
