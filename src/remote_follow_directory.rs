use crate::{error::FollowListError, follow_list::FollowListAccess};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, error};
use url::Url;

/// Characters the directory does not accept inside a key.
const FORBIDDEN_KEY_CHARACTERS: [char; 6] = ['.', '$', '#', '[', ']', '/'];

/// Follow lists as stored in the remote tree: either an array of ids, which
/// may contain `null` holes, or an object keyed by id (`{"S-1": true}`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FollowsDocument {
    List(Vec<Option<String>>),
    Keyed(BTreeMap<String, serde_json::Value>),
}

impl From<FollowsDocument> for Vec<String> {
    fn from(document: FollowsDocument) -> Self {
        match document {
            FollowsDocument::List(ids) => ids.into_iter().flatten().collect(),
            FollowsDocument::Keyed(ids) => ids.into_keys().collect(),
        }
    }
}

/// Follow directory served over a Realtime-Database-style REST interface:
/// `GET {base}/students/{id}/follows.json`.
#[derive(Debug, Clone)]
pub struct RemoteFollowDirectory {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl RemoteFollowDirectory {
    pub fn new(base_url: Url, auth_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url,
            auth_token,
        }
    }

    fn follow_list_url(&self, student_id: &str) -> Result<Url, FollowListError> {
        if student_id.contains(FORBIDDEN_KEY_CHARACTERS) {
            return Err(FollowListError::InvalidStudentId(student_id.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FollowListError::Backend(format!("Invalid base url {}", self.base_url)))?
            .pop_if_empty()
            .extend(["students", student_id, "follows.json"]);
        Ok(url)
    }
}

#[async_trait]
impl FollowListAccess for RemoteFollowDirectory {
    async fn get_follow_list(&self, student_id: &str) -> Result<Vec<String>, FollowListError> {
        let url = self.follow_list_url(student_id)?;
        debug!(%url, "Requesting follow list");

        let mut request = self.client.get(url);
        if let Some(token) = &self.auth_token {
            request = request.query(&[("auth", token)]);
        }
        let response = request.send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(FollowListError::PermissionDenied(student_id.to_string()))
            }
            StatusCode::NOT_FOUND => return Err(FollowListError::NotFound(student_id.to_string())),
            status if !status.is_success() => {
                error!(%status, student_id, "Follow directory answered with an error");
                return Err(FollowListError::Backend(format!(
                    "Unexpected status {status}"
                )));
            }
            _ => {}
        }

        let body = response.bytes().await?;
        let document: Option<FollowsDocument> = serde_json::from_slice(&body).map_err(|err| {
            error!(?err, student_id, "Follow directory returned an unreadable document");
            FollowListError::Backend(format!("Unreadable follow list: {err}"))
        })?;
        match document {
            Some(document) => Ok(document.into()),
            None => Err(FollowListError::NotFound(student_id.to_string())),
        }
    }
}
