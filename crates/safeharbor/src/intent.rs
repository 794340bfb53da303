//! Targets handed to the platform's dialer, messaging app, or browser.
//!
//! Launching is fire-and-forget and happens outside this crate; this module
//! only builds the target string.

use std::fmt;

use crate::directory::{Hotline, HotlineCategory, Resource};
use crate::model::Contact;

/// Something the platform can open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Place a call to a number.
    Dial(String),
    /// Compose a text message to a number.
    Text(String),
    /// Open a web page.
    Browse(String),
}

impl Intent {
    /// Call a contact.
    #[must_use]
    pub fn call(contact: &Contact) -> Self {
        Self::Dial(contact.phone.clone())
    }

    /// Text a contact.
    #[must_use]
    pub fn text(contact: &Contact) -> Self {
        Self::Text(contact.phone.clone())
    }

    /// Reach a hotline the way it expects to be reached.
    #[must_use]
    pub fn reach(hotline: &Hotline) -> Self {
        match hotline.category {
            HotlineCategory::TextSupport => Self::Text(hotline.number.to_string()),
            HotlineCategory::National | HotlineCategory::Emergency => {
                Self::Dial(hotline.number.to_string())
            }
        }
    }

    /// Open a resource's website.
    #[must_use]
    pub fn visit(resource: &Resource) -> Self {
        Self::Browse(resource.url.to_string())
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dial(number) => write!(f, "tel:{number}"),
            Self::Text(number) => write!(f, "sms:{number}"),
            Self::Browse(url) => f.write_str(url),
        }
    }
}
