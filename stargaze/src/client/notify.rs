/// Blocking, user-visible alerts raised by the controller.
///
/// A failed explanation has no other signal, so front ends must surface
/// these.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Writes alerts to the log. Used when nothing better is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn alert(&self, message: &str) {
        tracing::warn!(alert = message, "User alert");
    }
}
