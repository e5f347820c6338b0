//! **bspdesk**: arrange bspwm desktops according to the connected monitors.
//!
//! A configuration file lists named configurations, each tied to one exact
//! set of monitors and describing which desktops belong on which monitor and
//! in what order.  On every run the connected monitors are queried, the
//! matching configuration is selected, and desktops are created, moved,
//! removed and reordered until bspwm matches it.  Individual failures are
//! logged and skipped.
//!
//! # Architecture
//!
//! * [`traits::WindowManager`] abstracts the desktop operations so planning
//!   and reconciliation are not coupled to bspwm.
//! * [`plan`] is the pure planner: current state + configuration in,
//!   [`desktop::Action`]s out.
//! * [`reconciler::Reconciler`] runs one query/select/plan/apply pass.
//!
//! The concrete `bspc` backend lives in [`bspwm`].

pub mod bspwm;
pub mod config;
pub mod desktop;
pub mod plan;
pub mod reconciler;
pub mod traits;
