use crate::error::FollowListError;
use async_trait::async_trait;

/// Remote directory lookup of the students a student follows.
///
/// The returned `Result` is the completion signal: it carries either the
/// list of ids or the error, never both. Order and uniqueness of the ids
/// are whatever the directory returns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowListAccess: Send + Sync {
    async fn get_follow_list(&self, student_id: &str) -> Result<Vec<String>, FollowListError>;
}
