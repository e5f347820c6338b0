//! The trait that decouples bspdesk from any specific window manager.
//!
//! The [`Reconciler`](crate::reconciler::Reconciler) only talks to this
//! abstraction; the concrete `bspc` backend lives in [`crate::bspwm`] and
//! the tests use in-memory doubles.

/// Abstraction over a window manager that can list monitors and create,
/// move, remove and reorder desktops.
///
/// Desktops and monitors are addressed by name.  An implementation might
/// shell out to `bspc`, or it might be an in-memory stub used in tests.
pub trait WindowManager {
    /// The error type produced by this window manager.
    type Error: std::error::Error + Send + 'static;

    /// Return the names of the connected monitors.
    fn monitors(&self) -> Result<Vec<String>, Self::Error>;

    /// Return the desktop names on `monitor`, in window-manager order.
    fn desktops(&self, monitor: &str) -> Result<Vec<String>, Self::Error>;

    /// Append a new desktop called `desktop` to `monitor`.
    fn add_desktop(&self, monitor: &str, desktop: &str) -> Result<(), Self::Error>;

    /// Send `desktop` to the end of `monitor`.
    fn move_desktop(&self, desktop: &str, monitor: &str) -> Result<(), Self::Error>;

    /// Delete `desktop`.
    fn remove_desktop(&self, desktop: &str) -> Result<(), Self::Error>;

    /// Put the desktops of `monitor` into the order given by `desktops`.
    fn reorder_desktops(&self, monitor: &str, desktops: &[String]) -> Result<(), Self::Error>;
}
