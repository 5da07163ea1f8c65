use thiserror::Error;

/// Failures of the render surface API.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("render thread is no longer accepting events")]
    QueueClosed,
    #[error("render thread panicked")]
    WorkerPanicked,
    #[error("cannot spawn the render thread: {0}")]
    Spawn(#[from] std::io::Error),
}
