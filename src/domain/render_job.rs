//! Render job model for the serialized preview image queue.

use tokio::sync::oneshot;

use crate::domain::repositories::RenderError;

/// Completion signal for a single render job.
pub type RenderReply = oneshot::Receiver<Result<(), RenderError>>;

/// A request to materialize the cached preview image for `key`.
///
/// Created by [`crate::application::services::RenderQueue::render`], sent over
/// the bounded job channel and consumed by
/// [`crate::domain::render_worker::run_render_worker`]. Each job has exactly one
/// waiter, reached through `done`.
#[derive(Debug)]
pub struct RenderJob {
    pub key: String,
    pub text: String,
    pub done: oneshot::Sender<Result<(), RenderError>>,
}

impl RenderJob {
    /// Creates a job together with the receiver its submitter waits on.
    pub fn new(key: String, text: String) -> (Self, RenderReply) {
        let (done, reply) = oneshot::channel();
        (Self { key, text, done }, reply)
    }

    /// Delivers the result to the submitter.
    ///
    /// A submitter that stopped waiting is not an error: the work is already done.
    pub fn complete(self, result: Result<(), RenderError>) {
        let _ = self.done.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_complete_reaches_submitter() {
        let (job, reply) = RenderJob::new("hi".to_string(), "Hi".to_string());
        assert_eq!(job.key, "hi");

        job.complete(Err(RenderError::QueueClosed));

        let result = reply.await.unwrap();
        assert!(matches!(result, Err(RenderError::QueueClosed)));
    }

    #[test]
    fn test_complete_without_waiter_is_silent() {
        let (job, reply) = RenderJob::new("hi".to_string(), "Hi".to_string());
        drop(reply);

        job.complete(Ok(()));
    }
}
