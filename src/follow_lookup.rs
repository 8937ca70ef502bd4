//! Deadline and cancellation handling around a [`FollowListAccess`] backend.
//!
//! Backends only promise to complete eventually. `FollowListLookup` bounds
//! every lookup with a timeout and offers a callback style entry point whose
//! completion runs exactly once, even when the lookup is cancelled.

use crate::{error::FollowListError, follow_list::FollowListAccess};
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::oneshot,
    task::{JoinError, JoinHandle},
};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct FollowListLookup {
    access: Arc<dyn FollowListAccess>,
    timeout: Duration,
}

/// Handle to a lookup started with
/// [`FollowListLookup::get_follow_list_with_completion`].
///
/// Dropping the handle lets the lookup run to completion.
pub struct LookupHandle {
    cancel: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl LookupHandle {
    /// Completes the lookup with [`FollowListError::Cancelled`] unless the
    /// completion already ran.
    pub fn cancel(self) -> JoinHandle<()> {
        // The receiver is gone once the completion ran.
        let _ = self.cancel.send(());
        self.task
    }

    /// Waits until the completion has run.
    pub async fn finished(self) -> Result<(), JoinError> {
        self.task.await
    }
}

impl FollowListLookup {
    pub fn new(access: Arc<dyn FollowListAccess>, timeout: Duration) -> Self {
        Self { access, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn get_follow_list(&self, student_id: &str) -> Result<Vec<String>, FollowListError> {
        if student_id.is_empty() {
            return Err(FollowListError::EmptyStudentId);
        }

        match tokio::time::timeout(self.timeout, self.access.get_follow_list(student_id)).await {
            Ok(result) => {
                debug!(student_id, success = result.is_ok(), "Follow list lookup finished");
                result
            }
            Err(_) => {
                warn!(student_id, timeout = ?self.timeout, "Follow list lookup timed out");
                Err(FollowListError::Timeout(self.timeout))
            }
        }
    }

    /// Starts the lookup on a spawned task and hands the result to
    /// `completion`. Must be called from within a tokio runtime.
    pub fn get_follow_list_with_completion<C>(
        &self,
        student_id: impl Into<String>,
        completion: C,
    ) -> LookupHandle
    where
        C: FnOnce(Result<Vec<String>, FollowListError>) + Send + 'static,
    {
        let lookup = self.clone();
        let student_id = student_id.into();
        let (cancel, cancelled) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let result = tokio::select! {
                result = lookup.get_follow_list(&student_id) => result,
                Ok(()) = cancelled => {
                    debug!(student_id = %student_id, "Follow list lookup cancelled");
                    Err(FollowListError::Cancelled)
                }
            };
            completion(result);
        });

        LookupHandle { cancel, task }
    }
}
