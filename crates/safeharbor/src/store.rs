//! Record store for safeharbor.
//!
//! [`RecordStore`] persists exactly two records on a [`Medium`]: the emergency
//! contact collection and the safety plan. Each record is replaced whole on
//! every write.
//!
//! Failures are handled asymmetrically:
//! - reads never fail; an absent, unreadable, or corrupt record reads back as
//!   its default and the failure is logged
//! - writes always report failure so the caller can tell the user their data
//!   may not have been saved

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::medium::{Medium, SqliteMedium};
use crate::model::{Contact, ContactCollection, ContactDraft, ContactId, PlanField, SafetyPlan};

/// Key of the contact collection record.
pub const CONTACTS_KEY: &str = "@emergency_contacts";

/// Key of the safety plan record.
pub const SAFETY_PLAN_KEY: &str = "@safety_plan";

/// Typed access to the two persisted records.
///
/// The store caches nothing. Every call goes to the medium, so a read that
/// follows a completed write on the same key observes that write.
#[derive(Debug)]
pub struct RecordStore<M> {
    medium: M,
}

impl<M: Medium> RecordStore<M> {
    /// Create a store over the given medium.
    #[must_use]
    pub fn new(medium: M) -> Self {
        Self { medium }
    }

    /// Get the underlying medium.
    #[must_use]
    pub fn medium(&self) -> &M {
        &self.medium
    }

    /// Replace the stored contact collection.
    ///
    /// The collection is written as given; callers validate contacts first.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the medium write fails. The
    /// previously stored collection is left unchanged.
    pub async fn save_contacts(&self, contacts: &ContactCollection) -> Result<()> {
        self.save_record(CONTACTS_KEY, contacts).await
    }

    /// Load the stored contact collection.
    ///
    /// Returns an empty collection if nothing was saved or the record cannot
    /// be read.
    pub async fn get_contacts(&self) -> ContactCollection {
        self.load_record(CONTACTS_KEY).await.unwrap_or_default()
    }

    /// Replace the stored safety plan.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the medium write fails. The
    /// previously stored plan is left unchanged.
    pub async fn save_safety_plan(&self, plan: &SafetyPlan) -> Result<()> {
        self.save_record(SAFETY_PLAN_KEY, plan).await
    }

    /// Load the stored safety plan.
    ///
    /// Returns [`SafetyPlan::EMPTY`] if nothing was saved or the record cannot
    /// be read.
    pub async fn get_safety_plan(&self) -> SafetyPlan {
        self.load_record(SAFETY_PLAN_KEY)
            .await
            .unwrap_or(SafetyPlan::EMPTY)
    }

    /// Validate a new contact, append it, and save the collection.
    ///
    /// The stored collection is read strictly: if the medium cannot be read,
    /// nothing is written and the read failure is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is invalid, the stored collection cannot
    /// be read, or the save fails. Nothing is written in any of these cases.
    pub async fn add_contact(&self, draft: &ContactDraft) -> Result<Contact> {
        let mut contacts: ContactCollection =
            self.try_load_record(CONTACTS_KEY).await?.unwrap_or_default();
        let contact = contacts.add(draft)?.clone();
        self.save_contacts(&contacts).await?;
        Ok(contact)
    }

    /// Remove a contact by id and save the collection.
    ///
    /// Returns `false` without writing if no contact has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored collection cannot be read or the save
    /// fails.
    pub async fn remove_contact(&self, id: &ContactId) -> Result<bool> {
        let mut contacts: ContactCollection =
            self.try_load_record(CONTACTS_KEY).await?.unwrap_or_default();
        if contacts.remove(id).is_none() {
            debug!("No contact with id {} to remove", id);
            return Ok(false);
        }
        self.save_contacts(&contacts).await?;
        Ok(true)
    }

    /// Change one field of the safety plan and save the whole plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored plan cannot be read or the save fails.
    /// The other fields are never overwritten with defaults.
    pub async fn update_safety_plan(
        &self,
        field: PlanField,
        value: impl Into<String>,
    ) -> Result<SafetyPlan> {
        let mut plan = self
            .try_load_record(SAFETY_PLAN_KEY)
            .await?
            .unwrap_or(SafetyPlan::EMPTY);
        plan.set_field(field, value);
        self.save_safety_plan(&plan).await?;
        Ok(plan)
    }

    /// Delete the stored safety plan. Later reads return
    /// [`SafetyPlan::EMPTY`].
    ///
    /// Returns `false` if no plan was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium rejects the delete.
    pub async fn clear_safety_plan(&self) -> Result<bool> {
        let removed = self.medium.remove(SAFETY_PLAN_KEY).await.map_err(|e| {
            warn!("Failed to clear record {}: {}", SAFETY_PLAN_KEY, e);
            e
        })?;
        debug!("Cleared record {} (present: {})", SAFETY_PLAN_KEY, removed);
        Ok(removed)
    }

    /// Summarize what is stored. Never fails.
    pub async fn status(&self) -> StoreStatus {
        let safety_plan_saved = match self.medium.get(SAFETY_PLAN_KEY).await {
            Ok(value) => value.is_some(),
            Err(e) => {
                warn!("Failed to read record {}: {}", SAFETY_PLAN_KEY, e);
                false
            }
        };
        StoreStatus {
            contact_count: self.get_contacts().await.len(),
            safety_plan_saved,
            location: self.medium.describe(),
            contacts_saved_at: None,
            safety_plan_saved_at: None,
        }
    }

    async fn save_record<T: Serialize>(&self, key: &str, record: &T) -> Result<()> {
        let json = serde_json::to_string(record).map_err(|e| {
            warn!("Failed to serialize record {}: {}", key, e);
            e
        })?;
        self.medium.set(key, &json).await.map_err(|e| {
            warn!("Failed to save record {}: {}", key, e);
            e
        })?;
        debug!("Saved record {}", key);
        Ok(())
    }

    /// Read and decode a record, treating every failure as "absent".
    async fn load_record<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.try_load_record(key).await.unwrap_or_else(|e| {
            warn!("Failed to read record {}: {}", key, e);
            None
        })
    }

    /// Read and decode a record, reporting medium failures.
    ///
    /// `Ok(None)` means the record is absent or cannot be decoded. An
    /// undecodable record is already lost to every reader, so it is not
    /// treated as a failure.
    async fn try_load_record<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(json) = self.medium.get(key).await? else {
            debug!("Record {} not saved yet", key);
            return Ok(None);
        };

        match serde_json::from_str(&json) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!("Discarding unreadable record {}: {}", key, e);
                Ok(None)
            }
        }
    }
}

impl RecordStore<SqliteMedium> {
    /// Open the store described by the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(config: &Config) -> Result<Self> {
        let medium = if config.storage.in_memory {
            SqliteMedium::open_in_memory()?
        } else {
            SqliteMedium::open_with_timeout(config.database_path(), config.busy_timeout())?
        };
        Ok(Self::new(medium))
    }

    /// Summarize what is stored, including when each record was last saved.
    /// Never fails.
    pub async fn detailed_status(&self) -> StoreStatus {
        let mut status = self.status().await;
        status.contacts_saved_at = self.saved_at(CONTACTS_KEY).await;
        status.safety_plan_saved_at = self.saved_at(SAFETY_PLAN_KEY).await;
        status
    }

    async fn saved_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.medium.updated_at(key).await.unwrap_or_else(|e| {
            warn!("Failed to read save time of {}: {}", key, e);
            None
        })
    }
}

/// Summary of the stored records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStatus {
    /// Number of saved emergency contacts.
    pub contact_count: usize,
    /// Whether a safety plan record is stored, even one with every field
    /// empty.
    pub safety_plan_saved: bool,
    /// Where the records live.
    pub location: String,
    /// When the contact collection was last saved, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts_saved_at: Option<DateTime<Utc>>,
    /// When the safety plan was last saved, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_plan_saved_at: Option<DateTime<Utc>>,
}
