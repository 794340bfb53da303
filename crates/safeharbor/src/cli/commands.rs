//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::model::PlanField;

/// Emergency contact commands.
#[derive(Debug, Subcommand)]
pub enum ContactsCommand {
    /// List saved contacts
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Add a contact
    Add {
        /// Contact name
        #[arg(short, long)]
        name: String,

        /// Phone number
        #[arg(short, long)]
        phone: String,

        /// Relationship, e.g. "Sister" or "Friend"
        #[arg(short, long, default_value = "")]
        relationship: String,
    },

    /// Remove a contact by id
    Remove {
        /// Contact id as shown by `contacts list`
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the dialer target for a contact
    Call {
        /// Contact id
        id: String,
    },

    /// Show the messaging target for a contact
    Text {
        /// Contact id
        id: String,
    },
}

/// Safety plan commands.
#[derive(Debug, Subcommand)]
pub enum PlanCommand {
    /// Show the safety plan
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Set one field of the safety plan
    Set {
        /// Field to change
        #[arg(value_enum)]
        field: PlanFieldArg,

        /// New text for the field (may be empty)
        value: String,
    },

    /// Delete the saved safety plan
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments shared by the static listing commands.
#[derive(Debug, Args)]
pub struct ResourcesCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Safety plan field argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlanFieldArg {
    /// Safe places to go
    SafePlaces,
    /// Trusted contacts
    TrustedContacts,
    /// Important documents
    ImportantDocuments,
    /// Emergency bag items
    EmergencyBag,
    /// Code word
    CodeWord,
}

impl From<PlanFieldArg> for PlanField {
    fn from(arg: PlanFieldArg) -> Self {
        match arg {
            PlanFieldArg::SafePlaces => Self::SafePlaces,
            PlanFieldArg::TrustedContacts => Self::TrustedContacts,
            PlanFieldArg::ImportantDocuments => Self::ImportantDocuments,
            PlanFieldArg::EmergencyBag => Self::EmergencyBag,
            PlanFieldArg::CodeWord => Self::CodeWord,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_field_arg_conversion() {
        assert_eq!(
            PlanField::from(PlanFieldArg::SafePlaces),
            PlanField::SafePlaces
        );
        assert_eq!(
            PlanField::from(PlanFieldArg::TrustedContacts),
            PlanField::TrustedContacts
        );
        assert_eq!(
            PlanField::from(PlanFieldArg::ImportantDocuments),
            PlanField::ImportantDocuments
        );
        assert_eq!(
            PlanField::from(PlanFieldArg::EmergencyBag),
            PlanField::EmergencyBag
        );
        assert_eq!(PlanField::from(PlanFieldArg::CodeWord), PlanField::CodeWord);
    }

    #[test]
    fn test_plan_field_arg_value_names() {
        let names: Vec<_> = PlanFieldArg::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "safe-places",
                "trusted-contacts",
                "important-documents",
                "emergency-bag",
                "code-word"
            ]
        );
    }

    #[test]
    fn test_contacts_command_debug() {
        let cmd = ContactsCommand::Remove {
            id: "42".to_string(),
            yes: false,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Remove"));
        assert!(debug_str.contains("42"));
    }
}
