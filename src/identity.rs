//! Minimal identity shape shared by every kind of user record.

use crate::error::IdentityError;
use serde::{Deserialize, Serialize};

/// Identity fields any user record exposes.
///
/// `id` is the only mutable field and can never be set to an empty string.
pub trait UserIdentity {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String) -> Result<(), IdentityError>;
    fn full_name(&self) -> &str;
    fn photo_url(&self) -> Option<&str>;
}

fn checked_id(id: String) -> Result<String, IdentityError> {
    if id.is_empty() {
        return Err(IdentityError::EmptyId);
    }
    Ok(id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    id: String,
    full_name: String,
    photo_url: Option<String>,
}

impl StudentRecord {
    pub fn new(
        id: impl Into<String>,
        full_name: impl Into<String>,
        photo_url: Option<String>,
    ) -> Result<Self, IdentityError> {
        Ok(Self {
            id: checked_id(id.into())?,
            full_name: full_name.into(),
            photo_url,
        })
    }
}

impl UserIdentity for StudentRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) -> Result<(), IdentityError> {
        self.id = checked_id(id)?;
        Ok(())
    }

    fn full_name(&self) -> &str {
        &self.full_name
    }

    fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorRecord {
    id: String,
    full_name: String,
    photo_url: Option<String>,
    subjects: Vec<String>,
}

impl TutorRecord {
    pub fn new(
        id: impl Into<String>,
        full_name: impl Into<String>,
        photo_url: Option<String>,
        subjects: Vec<String>,
    ) -> Result<Self, IdentityError> {
        Ok(Self {
            id: checked_id(id.into())?,
            full_name: full_name.into(),
            photo_url,
            subjects,
        })
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }
}

impl UserIdentity for TutorRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) -> Result<(), IdentityError> {
        self.id = checked_id(id)?;
        Ok(())
    }

    fn full_name(&self) -> &str {
        &self.full_name
    }

    fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn display_line(user: &dyn UserIdentity) -> String {
        format!("{} ({})", user.full_name(), user.id())
    }

    #[test]
    fn test_records_are_usable_through_the_trait() {
        let student = StudentRecord::new("S-42", "Ada Lovelace", None).unwrap();
        let tutor = TutorRecord::new(
            "T-1",
            "Charles Babbage",
            Some("https://example.com/babbage.png".into()),
            vec!["Mathematics".into()],
        )
        .unwrap();

        assert_eq!(display_line(&student), "Ada Lovelace (S-42)");
        assert_eq!(display_line(&tutor), "Charles Babbage (T-1)");
        assert_eq!(student.photo_url(), None);
        assert_eq!(tutor.photo_url(), Some("https://example.com/babbage.png"));
        assert_eq!(tutor.subjects(), ["Mathematics".to_string()]);
    }

    #[test]
    fn test_empty_id_is_rejected() {
        assert_eq!(
            StudentRecord::new("", "Nobody", None).unwrap_err(),
            IdentityError::EmptyId
        );
        assert_eq!(
            TutorRecord::new("", "Nobody", None, vec![]).unwrap_err(),
            IdentityError::EmptyId
        );
    }

    #[test]
    fn test_set_id_keeps_profile_fields() {
        let mut student = StudentRecord::new("local-7", "Ada Lovelace", None).unwrap();

        student.set_id("S-42".into()).unwrap();
        assert_eq!(student.id(), "S-42");
        assert_eq!(student.full_name(), "Ada Lovelace");

        assert_eq!(student.set_id(String::new()), Err(IdentityError::EmptyId));
        assert_eq!(student.id(), "S-42");
    }
}
