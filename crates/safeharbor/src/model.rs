//! Record types for safeharbor.
//!
//! This module defines the two records kept on the device: the ordered
//! emergency contact collection and the free-text safety plan.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque, stable identifier of a stored contact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    /// Wrap an existing identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate an identifier not already present in `existing`.
    ///
    /// Identifiers are derived from the current millisecond timestamp. If an
    /// existing numeric id is at or beyond that value, the next one after the
    /// largest is used instead, so ids keep increasing.
    #[must_use]
    pub fn generate(existing: &ContactCollection) -> Self {
        let now = Utc::now().timestamp_millis();
        let next = existing
            .iter()
            .filter_map(|c| c.id.0.parse::<i64>().ok())
            .max()
            .map_or(now, |max| now.max(max.saturating_add(1)));
        Self(next.to_string())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContactId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A single emergency contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Unique identifier within the collection.
    pub id: ContactId,
    /// Display name, never empty once stored.
    pub name: String,
    /// Dialable phone number, never empty once stored.
    pub phone: String,
    /// Optional description such as "Sister". May be empty.
    #[serde(default)]
    pub relationship: String,
}

/// Unvalidated user input for a new contact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    /// Name as typed.
    pub name: String,
    /// Phone number as typed.
    pub phone: String,
    /// Relationship as typed.
    pub relationship: String,
}

impl ContactDraft {
    /// Create a draft from raw input.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        relationship: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            relationship: relationship.into(),
        }
    }

    /// Trim every field and reject drafts with no name or phone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContact`] if the trimmed name or phone is empty.
    pub fn validate(&self) -> Result<Self> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        if name.is_empty() || phone.is_empty() {
            return Err(Error::invalid_contact(
                "Please enter both name and phone number.",
            ));
        }
        Ok(Self {
            name: name.to_string(),
            phone: phone.to_string(),
            relationship: self.relationship.trim().to_string(),
        })
    }
}

/// Ordered collection of contacts. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactCollection(Vec<Contact>);

impl ContactCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a draft, assign it a fresh id, and append it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContact`] if the draft fails validation.
    pub fn add(&mut self, draft: &ContactDraft) -> Result<&Contact> {
        let draft = draft.validate()?;
        let contact = Contact {
            id: ContactId::generate(self),
            name: draft.name,
            phone: draft.phone,
            relationship: draft.relationship,
        };
        self.0.push(contact);
        let last = self.0.len() - 1;
        Ok(&self.0[last])
    }

    /// Remove the contact with the given id, returning it if present.
    pub fn remove(&mut self, id: &ContactId) -> Option<Contact> {
        let index = self.0.iter().position(|c| &c.id == id)?;
        Some(self.0.remove(index))
    }

    /// Look up a contact by id.
    #[must_use]
    pub fn get(&self, id: &ContactId) -> Option<&Contact> {
        self.0.iter().find(|c| &c.id == id)
    }

    /// Iterate over contacts in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Contact> {
        self.0.iter()
    }

    /// Number of contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the collection has no contacts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Contact>> for ContactCollection {
    fn from(contacts: Vec<Contact>) -> Self {
        Self(contacts)
    }
}

impl<'a> IntoIterator for &'a ContactCollection {
    type Item = &'a Contact;
    type IntoIter = std::slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The user's personal safety plan.
///
/// Every field is free text and may be empty. Fields missing from a stored
/// record read back as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SafetyPlan {
    /// Places the user can go to be safe.
    pub safe_places: String,
    /// People the user trusts.
    pub trusted_contacts: String,
    /// Documents to take and where they are kept.
    pub important_documents: String,
    /// Items packed in the emergency bag.
    pub emergency_bag: String,
    /// Word agreed with trusted people to signal danger.
    pub code_word: String,
}

impl SafetyPlan {
    /// The plan returned when nothing has been saved yet.
    pub const EMPTY: Self = Self {
        safe_places: String::new(),
        trusted_contacts: String::new(),
        important_documents: String::new(),
        emergency_bag: String::new(),
        code_word: String::new(),
    };

    /// Get the value of a single field.
    #[must_use]
    pub fn field(&self, field: PlanField) -> &str {
        match field {
            PlanField::SafePlaces => &self.safe_places,
            PlanField::TrustedContacts => &self.trusted_contacts,
            PlanField::ImportantDocuments => &self.important_documents,
            PlanField::EmergencyBag => &self.emergency_bag,
            PlanField::CodeWord => &self.code_word,
        }
    }

    /// Replace the value of a single field.
    pub fn set_field(&mut self, field: PlanField, value: impl Into<String>) {
        let slot = match field {
            PlanField::SafePlaces => &mut self.safe_places,
            PlanField::TrustedContacts => &mut self.trusted_contacts,
            PlanField::ImportantDocuments => &mut self.important_documents,
            PlanField::EmergencyBag => &mut self.emergency_bag,
            PlanField::CodeWord => &mut self.code_word,
        };
        *slot = value.into();
    }

    /// Whether every field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        PlanField::ALL.iter().all(|f| self.field(*f).is_empty())
    }
}

/// Names one field of a [`SafetyPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanField {
    /// `safePlaces`
    SafePlaces,
    /// `trustedContacts`
    TrustedContacts,
    /// `importantDocuments`
    ImportantDocuments,
    /// `emergencyBag`
    EmergencyBag,
    /// `codeWord`
    CodeWord,
}

impl PlanField {
    /// All fields in display order.
    pub const ALL: [Self; 5] = [
        Self::SafePlaces,
        Self::TrustedContacts,
        Self::ImportantDocuments,
        Self::EmergencyBag,
        Self::CodeWord,
    ];

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SafePlaces => "Safe Places to Go",
            Self::TrustedContacts => "Trusted Contacts",
            Self::ImportantDocuments => "Important Documents",
            Self::EmergencyBag => "Emergency Bag Items",
            Self::CodeWord => "Code Word",
        }
    }

    /// Key used in the stored record.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::SafePlaces => "safePlaces",
            Self::TrustedContacts => "trustedContacts",
            Self::ImportantDocuments => "importantDocuments",
            Self::EmergencyBag => "emergencyBag",
            Self::CodeWord => "codeWord",
        }
    }
}

impl fmt::Display for PlanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_contact(id: &str) -> Contact {
        Contact {
            id: ContactId::new(id),
            name: "Alex".to_string(),
            phone: "555-0100".to_string(),
            relationship: "Sister".to_string(),
        }
    }

    #[test]
    fn test_draft_validate_trims() {
        let draft = ContactDraft::new("  Alex ", " 555-0100\n", " Sister ");
        let valid = draft.validate().unwrap();
        assert_eq!(valid.name, "Alex");
        assert_eq!(valid.phone, "555-0100");
        assert_eq!(valid.relationship, "Sister");
    }

    #[test]
    fn test_draft_validate_rejects_blank_name() {
        let draft = ContactDraft::new("   ", "555-0100", "");
        let err = draft.validate().unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_draft_validate_rejects_blank_phone() {
        let draft = ContactDraft::new("Alex", "", "");
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_draft_allows_empty_relationship() {
        let draft = ContactDraft::new("Alex", "555-0100", "  ");
        assert_eq!(draft.validate().unwrap().relationship, "");
    }

    #[test]
    fn test_collection_add_assigns_unique_ids() {
        let mut contacts = ContactCollection::new();
        let draft = ContactDraft::new("Alex", "555-0100", "");
        let first = contacts.add(&draft).unwrap().id.clone();
        let second = contacts.add(&draft).unwrap().id.clone();

        assert_ne!(first, second);
        assert_eq!(contacts.len(), 2);
    }

    #[test]
    fn test_generate_skips_past_existing_ids() {
        let far_future = (Utc::now().timestamp_millis() + 1_000_000).to_string();
        let contacts = ContactCollection::from(vec![sample_contact(&far_future)]);

        let id = ContactId::generate(&contacts);
        let expected = far_future.parse::<i64>().unwrap() + 1;
        assert_eq!(id.as_str(), expected.to_string());
    }

    #[test]
    fn test_generate_ignores_non_numeric_ids() {
        let contacts = ContactCollection::from(vec![sample_contact("abc")]);
        let id = ContactId::generate(&contacts);
        assert!(id.as_str().parse::<i64>().is_ok());
    }

    #[test]
    fn test_collection_remove() {
        let mut contacts =
            ContactCollection::from(vec![sample_contact("1"), sample_contact("2")]);

        let removed = contacts.remove(&ContactId::new("1")).unwrap();
        assert_eq!(removed.id.as_str(), "1");
        assert_eq!(contacts.len(), 1);
        assert!(contacts.remove(&ContactId::new("1")).is_none());
    }

    #[test]
    fn test_collection_preserves_order() {
        let contacts = ContactCollection::from(vec![
            sample_contact("3"),
            sample_contact("1"),
            sample_contact("2"),
        ]);
        let ids: Vec<&str> = contacts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_contact_json_shape() {
        let json = serde_json::to_value(sample_contact("1")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "name": "Alex",
                "phone": "555-0100",
                "relationship": "Sister"
            })
        );
    }

    #[test]
    fn test_collection_serializes_as_array() {
        let contacts = ContactCollection::from(vec![sample_contact("1")]);
        let json = serde_json::to_string(&contacts).unwrap();
        assert!(json.starts_with('['));
    }

    #[test]
    fn test_contact_missing_relationship_reads_empty() {
        let json = r#"{"id":"7","name":"Sam","phone":"911"}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.relationship, "");
    }

    #[test]
    fn test_empty_plan_matches_default() {
        assert_eq!(SafetyPlan::EMPTY, SafetyPlan::default());
        assert!(SafetyPlan::EMPTY.is_empty());
    }

    #[test]
    fn test_plan_json_uses_camel_case() {
        let json = serde_json::to_value(SafetyPlan::EMPTY).unwrap();
        for field in PlanField::ALL {
            assert_eq!(json[field.key()], "");
        }
    }

    #[test]
    fn test_plan_missing_fields_read_empty() {
        let plan: SafetyPlan = serde_json::from_str(r#"{"codeWord":"pineapple"}"#).unwrap();
        assert_eq!(plan.code_word, "pineapple");
        assert_eq!(plan.safe_places, "");
    }

    #[test]
    fn test_plan_set_and_get_field() {
        let mut plan = SafetyPlan::default();
        plan.set_field(PlanField::EmergencyBag, "Bag by door");
        assert_eq!(plan.field(PlanField::EmergencyBag), "Bag by door");
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_plan_field_display() {
        assert_eq!(PlanField::CodeWord.to_string(), "Code Word");
    }
}
