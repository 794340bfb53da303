//! `safeharbor` - CLI for safeharbor
//!
//! This binary manages emergency contacts and the safety plan stored on this
//! device, and lists crisis hotlines.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use safeharbor::cli::{Cli, Command, ConfigCommand, ContactsCommand, PlanCommand};
use safeharbor::directory::{self, HotlineCategory};
use safeharbor::{
    init_logging, Config, ContactDraft, ContactId, Intent, RecordStore, SqliteMedium,
};

type Store = RecordStore<SqliteMedium>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Contacts(cmd) => handle_contacts(&open_store(&config)?, cmd).await,
        Command::Plan(cmd) => handle_plan(&open_store(&config)?, cmd).await,
        Command::Hotlines(cmd) => handle_hotlines(cmd.json),
        Command::Resources(cmd) => handle_resources(cmd.json),
        Command::Learn(cmd) => handle_learn(cmd.json),
        Command::Status(cmd) => handle_status(&open_store(&config)?, cmd.json).await,
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_store(config: &Config) -> anyhow::Result<Store> {
    RecordStore::open(config).with_context(|| {
        format!(
            "opening record database at {}",
            config.database_path().display()
        )
    })
}

/// Turn a failed write into the user-facing notice and a non-zero exit.
fn report_write<T>(result: safeharbor::Result<T>) -> anyhow::Result<T> {
    result.map_err(|e| {
        let notice = e.user_message();
        anyhow::Error::new(e).context(notice)
    })
}

async fn handle_contacts(store: &Store, cmd: ContactsCommand) -> anyhow::Result<()> {
    match cmd {
        ContactsCommand::List { json } => {
            let contacts = store.get_contacts().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&contacts)?);
            } else if contacts.is_empty() {
                println!("No emergency contacts saved yet.");
            } else {
                for contact in &contacts {
                    if contact.relationship.is_empty() {
                        println!("{}  {}  {}", contact.id, contact.name, contact.phone);
                    } else {
                        println!(
                            "{}  {} ({})  {}",
                            contact.id, contact.name, contact.relationship, contact.phone
                        );
                    }
                }
            }
        }
        ContactsCommand::Add {
            name,
            phone,
            relationship,
        } => {
            let draft = ContactDraft::new(name, phone, relationship);
            let contact = report_write(store.add_contact(&draft).await)?;
            println!("Contact added successfully. (id {})", contact.id);
        }
        ContactsCommand::Remove { id, yes } => {
            if !yes {
                println!("Are you sure you want to delete contact {id}?");
                println!("Use --yes to confirm.");
            } else if report_write(store.remove_contact(&ContactId::new(id.as_str())).await)? {
                println!("Contact deleted.");
            } else {
                println!("No contact with id {id}.");
            }
        }
        ContactsCommand::Call { id } => print_contact_intent(store, &id, Intent::call).await,
        ContactsCommand::Text { id } => print_contact_intent(store, &id, Intent::text).await,
    }
    Ok(())
}

async fn print_contact_intent(
    store: &Store,
    id: &str,
    intent: fn(&safeharbor::Contact) -> Intent,
) {
    let contacts = store.get_contacts().await;
    match contacts.get(&ContactId::new(id)) {
        Some(contact) => println!("{}", intent(contact)),
        None => println!("No contact with id {id}."),
    }
}

async fn handle_plan(store: &Store, cmd: PlanCommand) -> anyhow::Result<()> {
    match cmd {
        PlanCommand::Show { json } => {
            let plan = store.get_safety_plan().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                println!("Your Personal Safety Plan");
                println!("=========================");
                for field in safeharbor::PlanField::ALL {
                    println!();
                    println!("[{}]", field.label());
                    let value = plan.field(field);
                    if value.is_empty() {
                        println!("  (not filled in)");
                    } else {
                        for line in value.lines() {
                            println!("  {line}");
                        }
                    }
                }
                println!();
                println!("Safety Tips:");
                for tip in directory::SAFETY_TIPS {
                    println!("  - {tip}");
                }
            }
        }
        PlanCommand::Set { field, value } => {
            report_write(store.update_safety_plan(field.into(), value).await)?;
            println!("Your safety plan has been saved securely.");
        }
        PlanCommand::Clear { yes } => {
            if !yes {
                println!("This will delete every field of your safety plan.");
                println!("Use --yes to confirm.");
            } else if report_write(store.clear_safety_plan().await)? {
                println!("Safety plan cleared.");
            } else {
                println!("No safety plan saved.");
            }
        }
    }
    Ok(())
}

fn handle_hotlines(json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(directory::hotlines())?);
        return Ok(());
    }

    println!("24/7 Support Available");
    println!("You can call these numbers anytime, day or night.");
    for (title, category) in [
        ("National Hotlines", HotlineCategory::National),
        ("Text & Chat Support", HotlineCategory::TextSupport),
        ("Emergency Services", HotlineCategory::Emergency),
    ] {
        println!();
        println!("{title}");
        for hotline in directory::hotlines_in(category) {
            println!("  {}  {}", hotline.name, Intent::reach(hotline));
            println!("    {}", hotline.info);
        }
        if category == HotlineCategory::TextSupport {
            let chat = directory::online_chat();
            println!("  {}  {}", chat.title, Intent::visit(chat));
            println!("    {}", chat.description);
        }
    }
    println!();
    println!("Tip: {}", directory::DISCRETION_TIP);
    Ok(())
}

fn handle_resources(json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(directory::resources())?);
        return Ok(());
    }

    println!("Support Resources");
    for resource in directory::resources() {
        println!();
        println!("  {}", resource.title);
        println!("    {}", Intent::visit(resource));
        println!("    {}", resource.description);
    }
    Ok(())
}

fn handle_learn(json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(directory::topics())?);
        return Ok(());
    }

    for (section, topics) in directory::topic_sections() {
        println!();
        println!("{section}");
        for topic in topics {
            println!();
            println!("  {}", topic.title);
            if !topic.body.is_empty() {
                println!("    {}", topic.body);
            }
            for point in topic.points {
                println!("    - {point}");
            }
        }
    }
    println!();
    println!("{}", directory::REASSURANCE);
    Ok(())
}

async fn handle_status(store: &Store, json: bool) -> anyhow::Result<()> {
    let status = store.detailed_status().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("safeharbor status");
        println!("-----------------");
        println!("Storage:       {}", status.location);
        println!(
            "Contacts:      {} (last saved: {})",
            status.contact_count,
            describe_saved_at(status.contacts_saved_at)
        );
        println!(
            "Safety plan:   {} (last saved: {})",
            if status.safety_plan_saved {
                "saved"
            } else {
                "not started"
            },
            describe_saved_at(status.safety_plan_saved_at)
        );
        println!("Database size: {} bytes", store.medium().size_bytes());
    }
    Ok(())
}

fn describe_saved_at(at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    at.map_or_else(
        || "never".to_string(),
        |at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Busy timeout (ms):  {}", config.storage.busy_timeout_ms);
                println!("  In memory:          {}", config.storage.in_memory);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
