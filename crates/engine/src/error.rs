use thiserror::Error;

/// Failures setting up a [`Session`](crate::Session)
///
/// Gameplay itself never errors; invalid commands are ignored.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no tokio runtime available")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    #[error("{name} must be greater than zero")]
    ZeroDuration { name: &'static str },
}
