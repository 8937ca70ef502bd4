use crate::{
    error::FollowListError,
    follow_list::FollowListAccess,
    identity::{StudentRecord, UserIdentity},
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};
use tracing::{debug, error};

/// In-memory follow directory, used when no remote directory is configured.
#[derive(Debug, Clone, Default)]
pub struct LocalFollowDirectory {
    follows: Arc<Mutex<HashMap<String, Vec<String>>>>,
}

impl LocalFollowDirectory {
    pub fn register_student<U: UserIdentity + ?Sized>(&self, student: &U, follows: Vec<String>) {
        debug!(
            student_id = student.id(),
            full_name = student.full_name(),
            "Registering student"
        );
        self.follows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(student.id().to_string(), follows);
    }

    pub fn insert_example_students(&self) {
        const EXAMPLES: [(&str, &str, &[&str]); 3] = [
            ("S-1", "Ada Lovelace", &["S-7"]),
            ("S-7", "Grace Hopper", &[]),
            ("S-42", "Alan Turing", &["S-1", "S-7"]),
        ];

        for (id, full_name, follows) in EXAMPLES {
            match StudentRecord::new(id, full_name, None) {
                Ok(student) => self.register_student(
                    &student,
                    follows.iter().map(|id| id.to_string()).collect(),
                ),
                Err(err) => error!(?err, "Failed to create example student {id}"),
            }
        }
    }
}

#[async_trait]
impl FollowListAccess for LocalFollowDirectory {
    async fn get_follow_list(&self, student_id: &str) -> Result<Vec<String>, FollowListError> {
        self.follows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(student_id)
            .cloned()
            .ok_or_else(|| FollowListError::NotFound(student_id.to_string()))
    }
}
