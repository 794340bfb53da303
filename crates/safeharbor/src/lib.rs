//! `safeharbor` - Private, on-device storage for safety planning
//!
//! This library keeps two records on the local device: an ordered list of
//! emergency contacts and a free-text safety plan. It also carries a static
//! directory of crisis hotlines and support organizations.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod intent;
pub mod logging;
pub mod medium;
pub mod model;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use intent::Intent;
pub use logging::init_logging;
pub use medium::{Medium, MemoryMedium, SqliteMedium};
pub use model::{Contact, ContactCollection, ContactDraft, ContactId, PlanField, SafetyPlan};
pub use store::{RecordStore, StoreStatus};
