//! Table of top-level commands, applied to the clap definition at startup.

use crate::cli::main_types::Cli;
use clap::{Command, CommandFactory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub usage: &'static str,
    pub category: Option<&'static str>,
}

pub fn billing() -> CommandDescriptor {
    CommandDescriptor {
        name: "billing",
        usage: "Manage your billing information",
        category: None,
    }
}

pub fn oauth() -> CommandDescriptor {
    CommandDescriptor {
        name: "oauth",
        usage: "Authenticate with an OAuth provider to register, login or link accounts",
        category: Some("AUTHENTICATION"),
    }
}

pub fn commands() -> [CommandDescriptor; 2] {
    [oauth(), billing()]
}

/// The clap command with usage text and categories from the table.
pub fn build_command() -> Command {
    let table = commands();
    let mut cmd = Cli::command();
    for descriptor in table {
        cmd = cmd.mut_subcommand(descriptor.name, |sub| sub.about(descriptor.usage));
    }

    let mut categories: Vec<&str> = table.iter().filter_map(|d| d.category).collect();
    categories.dedup();
    if categories.is_empty() {
        return cmd;
    }

    let mut sections = Vec::new();
    for category in categories {
        let names: Vec<&str> = table
            .iter()
            .filter(|d| d.category == Some(category))
            .map(|d| d.name)
            .collect();
        sections.push(format!("{}:\n  {}", category, names.join(", ")));
    }
    cmd.after_help(sections.join("\n\n"))
}
