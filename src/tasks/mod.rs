use std::future::Future;

use crate::error::Result;

/// Detached side-effect work: spawned, never awaited, never cancelled.
/// The triggering request does not wait for it and cannot observe its
/// outcome; failures end here, at the logging sink, and nowhere else.
pub fn detach<F>(label: &'static str, work: F)
where
    F: Future<Output = Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(error) = work.await {
            tracing::warn!(task = label, error = %error, "Detached task failed");
        }
    });
}
