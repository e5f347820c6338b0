//! Reconciliation planning.
//!
//! [`plan`] compares what the window manager currently shows with a
//! [`Configuration`] and returns the [`Action`]s that converge the former to
//! the latter.  Planning is pure: it works on a simulated [`DesktopState`]
//! that is updated as each action is emitted, so later decisions see the
//! effect of earlier ones.
//!
//! Actions come out in three phases:
//!
//! 1. creates and moves, in layout order,
//! 2. removals of desktops no layout names (if enabled),
//! 3. reorders of layout monitors whose order is still wrong (if enabled).

use crate::config::{Configuration, Options};
use crate::desktop::{Action, MonitorDesktops};
use log::{debug, warn};
use std::collections::HashSet;

/// Simulated desktop placement across all monitors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopState {
    monitors: Vec<MonitorDesktops>,
}

impl DesktopState {
    pub fn new(monitors: Vec<MonitorDesktops>) -> Self {
        Self { monitors }
    }

    //  Accessors

    pub fn monitors(&self) -> &[MonitorDesktops] {
        &self.monitors
    }

    /// Desktops currently on `monitor`, or `None` if it is not connected.
    pub fn desktops_on(&self, monitor: &str) -> Option<&[String]> {
        self.monitor(monitor).map(|m| m.desktops.as_slice())
    }

    /// Name of the monitor holding `desktop` (first hit if the name repeats).
    pub fn locate(&self, desktop: &str) -> Option<&str> {
        self.monitors
            .iter()
            .find(|m| m.contains(desktop))
            .map(|m| m.monitor.as_str())
    }

    fn monitor(&self, monitor: &str) -> Option<&MonitorDesktops> {
        self.monitors.iter().find(|m| m.monitor == monitor)
    }

    fn monitor_mut(&mut self, monitor: &str) -> Option<&mut MonitorDesktops> {
        self.monitors.iter_mut().find(|m| m.monitor == monitor)
    }

    //  Mutations (mirror what the window manager does for each action)

    /// Apply `action` to the simulation.
    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::Create { monitor, desktop } => {
                if let Some(m) = self.monitor_mut(monitor) {
                    m.desktops.push(desktop.clone());
                }
            }
            Action::Move { desktop, monitor } => {
                if self.monitor(monitor).is_none() {
                    return;
                }
                if self.take(desktop) {
                    if let Some(m) = self.monitor_mut(monitor) {
                        m.desktops.push(desktop.clone());
                    }
                }
            }
            Action::Remove { desktop } => {
                self.take(desktop);
            }
            Action::Reorder { monitor, desktops } => {
                if let Some(m) = self.monitor_mut(monitor) {
                    let mut rest = m.desktops.clone();
                    let mut ordered = Vec::with_capacity(rest.len());
                    for name in desktops {
                        if let Some(i) = rest.iter().position(|d| d == name) {
                            ordered.push(rest.remove(i));
                        }
                    }
                    ordered.extend(rest);
                    m.desktops = ordered;
                }
            }
        }
    }

    /// A name for a throwaway desktop that clashes with nothing in the
    /// simulation or in `wanted`.
    fn placeholder_name(&self, wanted: &HashSet<&str>) -> String {
        let taken = |name: &str| {
            wanted.contains(name) || self.monitors.iter().any(|m| m.contains(name))
        };
        let mut name = String::from("Desktop");
        let mut n = 2;
        while taken(&name) {
            name = format!("Desktop{}", n);
            n += 1;
        }
        name
    }

    /// Drop the first desktop called `desktop`; returns whether one existed.
    fn take(&mut self, desktop: &str) -> bool {
        for m in &mut self.monitors {
            if let Some(i) = m.desktops.iter().position(|d| d == desktop) {
                m.desktops.remove(i);
                return true;
            }
        }
        false
    }
}

/// The desktops wanted on one connected monitor, after merging layouts and
/// dropping repeated desktop names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub monitor: String,
    pub desktops: Vec<String>,
}

/// Resolve the layouts of `configuration` against the connected monitors.
///
/// Layouts for monitors that are not connected are skipped.  Layouts that
/// share a monitor are merged in file order.  A desktop named more than once
/// keeps its first placement.
pub fn targets(state: &DesktopState, configuration: &Configuration) -> Vec<Target> {
    let mut targets: Vec<Target> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for layout in &configuration.layouts {
        if state.desktops_on(&layout.monitor).is_none() {
            warn!(
                "layout for {} in {:?} skipped: monitor not connected",
                layout.monitor, configuration.name
            );
            continue;
        }

        let index = match targets.iter().position(|t| t.monitor == layout.monitor) {
            Some(i) => i,
            None => {
                targets.push(Target {
                    monitor: layout.monitor.clone(),
                    desktops: Vec::new(),
                });
                targets.len() - 1
            }
        };

        for desktop in &layout.desktops {
            if !seen.insert(desktop.as_str()) {
                warn!(
                    "desktop {} listed more than once in {:?}, keeping first placement",
                    desktop, configuration.name
                );
                continue;
            }
            targets[index].desktops.push(desktop.clone());
        }
    }

    targets
}

/// Compute the actions that bring `current` in line with `configuration`.
///
/// Applying the returned actions to `current` (see [`DesktopState::apply`])
/// and planning again yields no actions.
pub fn plan(
    current: &[MonitorDesktops],
    configuration: &Configuration,
    options: &Options,
) -> Vec<Action> {
    let mut state = DesktopState::new(current.to_vec());
    let targets = targets(&state, configuration);
    let mut actions = Vec::new();

    let mut emit = |state: &mut DesktopState, action: Action| {
        debug!("plan: {}", action);
        state.apply(&action);
        actions.push(action);
    };

    //  Phase 1: place every wanted desktop on its monitor

    let wanted: HashSet<&str> = targets
        .iter()
        .flat_map(|t| t.desktops.iter().map(String::as_str))
        .collect();

    for target in &targets {
        for desktop in &target.desktops {
            let source = match state.locate(desktop) {
                Some(monitor) if monitor == target.monitor => continue,
                Some(monitor) => Some(monitor.to_string()),
                None => None,
            };
            let Some(source) = source else {
                emit(
                    &mut state,
                    Action::Create {
                        monitor: target.monitor.clone(),
                        desktop: desktop.clone(),
                    },
                );
                continue;
            };

            // bspwm refuses to take the last desktop off a monitor.
            if state.desktops_on(&source).map_or(0, |d| d.len()) <= 1 {
                let placeholder = state.placeholder_name(&wanted);
                emit(
                    &mut state,
                    Action::Create {
                        monitor: source,
                        desktop: placeholder,
                    },
                );
            }
            emit(
                &mut state,
                Action::Move {
                    desktop: desktop.clone(),
                    monitor: target.monitor.clone(),
                },
            );
        }
    }

    //  Phase 2: drop what nobody asked for

    if options.remove_unlisted {
        let monitor_names: Vec<String> =
            state.monitors().iter().map(|m| m.monitor.clone()).collect();
        for monitor in monitor_names {
            let allowed: &[String] = targets
                .iter()
                .find(|t| t.monitor == monitor)
                .map(|t| t.desktops.as_slice())
                .unwrap_or_default();

            // Every repeat of a wanted name counts as unlisted.
            let unlisted: Vec<String> = {
                let mut kept: HashSet<&str> = HashSet::new();
                state
                    .desktops_on(&monitor)
                    .unwrap_or_default()
                    .iter()
                    .filter(|d| !(allowed.contains(d) && kept.insert(d.as_str())))
                    .cloned()
                    .collect()
            };

            for desktop in unlisted {
                let remaining = state.desktops_on(&monitor).map_or(0, |d| d.len());
                if remaining <= 1 {
                    warn!(
                        "keeping {} so that {} is not left without desktops",
                        desktop, monitor
                    );
                    continue;
                }
                // bspc resolves a name to its first match across monitors.
                if state.locate(&desktop) != Some(monitor.as_str()) {
                    warn!(
                        "keeping {} on {}: the name also exists on an earlier monitor",
                        desktop, monitor
                    );
                    continue;
                }
                emit(&mut state, Action::Remove { desktop });
            }
        }
    }

    //  Phase 3: fix the order on each layout monitor

    if options.reorder {
        for target in &targets {
            let current = match state.desktops_on(&target.monitor) {
                Some(d) => d.to_vec(),
                None => continue,
            };
            let mut order = target.desktops.clone();
            order.extend(without_first(&current, &target.desktops));
            if current != order {
                emit(
                    &mut state,
                    Action::Reorder {
                        monitor: target.monitor.clone(),
                        desktops: order,
                    },
                );
            }
        }
    }

    actions
}

/// `list` with the first occurrence of each of `names` taken out.
fn without_first(list: &[String], names: &[String]) -> Vec<String> {
    let mut rest = list.to_vec();
    for name in names {
        if let Some(i) = rest.iter().position(|d| d == name) {
            rest.remove(i);
        }
    }
    rest
}
