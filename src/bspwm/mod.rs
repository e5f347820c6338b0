//! bspwm-specific implementations.
//!
//! This module provides the concrete backend for the
//! [`WindowManager`](crate::traits::WindowManager) trait, powered by the
//! `bspc` control client.
//!
//! Nothing outside this module should reference bspwm directly.

pub mod wm;
