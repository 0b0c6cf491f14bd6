use anyhow::Result;

/// A named, zero-argument host-system action.
///
/// Implementations perform one OS-level side effect (launch an application,
/// capture the screen, run a script) and return a short human-readable
/// status string. Handlers that start external processes must do so
/// fire-and-forget: a hanging or misbehaving process must never block the
/// frame-processing loop, so handlers spawn and return without waiting.
pub trait ActionHandler: Send {
    /// Handler identifier, for logs.
    fn name(&self) -> &'static str;

    /// Perform the side effect.
    fn invoke(&mut self) -> Result<String>;
}
