use std::fmt;

use compactor_core::{ItemCatalog, ItemType};
use compactor_engine::DropOrigin;
use compactor_inventory::Inventory;
use compactor_rules::{CompactionRule, RuleTable, ValidationError};
use tracing::warn;

use crate::state::Compactor;

pub const PERM_USE: &str = "compact.use";
pub const PERM_RELOAD: &str = "compact.reload";
pub const PERM_ADD: &str = "compact.edit.add";
pub const PERM_REMOVE: &str = "compact.edit.rm";

const SUBCOMMANDS: [&str; 3] = ["add", "rm", "reload"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandError {}

/// Which half of a rule edit to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Add,
    Remove,
}

impl EditKind {
    fn permission(self) -> &'static str {
        match self {
            Self::Add => PERM_ADD,
            Self::Remove => PERM_REMOVE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompactCommand {
    Compact,
    Reload,
    Edit {
        kind: EditKind,
        source: String,
        count: String,
        target: String,
    },
}

impl CompactCommand {
    fn permission(&self) -> &'static str {
        match self {
            Self::Compact => PERM_USE,
            Self::Reload => PERM_RELOAD,
            Self::Edit { kind, .. } => kind.permission(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// False when the invocation was rejected and usage should be shown.
    pub handled: bool,
    pub lines: Vec<String>,
}

impl CommandOutput {
    fn rejected() -> Self {
        Self::default()
    }

    fn handled(lines: Vec<String>) -> Self {
        Self {
            handled: true,
            lines,
        }
    }
}

/// Whoever issued the command.
pub trait CommandContext {
    fn sender_name(&self) -> &str;
    fn has_permission(&self, node: &str) -> bool;

    /// The sender's inventory; `None` for senders that are not players.
    fn inventory(&mut self) -> Option<&mut Inventory>;

    /// Put one unit that did not fit back on the ground next to the sender.
    fn drop_item(&mut self, item: ItemType);
}

/// The server console: every permission, no inventory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Console;

impl CommandContext for Console {
    fn sender_name(&self) -> &str {
        "CONSOLE"
    }

    fn has_permission(&self, _node: &str) -> bool {
        true
    }

    fn inventory(&mut self) -> Option<&mut Inventory> {
        None
    }

    fn drop_item(&mut self, _item: ItemType) {}
}

pub fn parse_command(args: &[&str]) -> Result<CompactCommand, CommandError> {
    match args {
        [] => Ok(CompactCommand::Compact),
        ["reload"] => Ok(CompactCommand::Reload),
        [sub @ ("add" | "rm"), source, count, target] => Ok(CompactCommand::Edit {
            kind: if *sub == "add" {
                EditKind::Add
            } else {
                EditKind::Remove
            },
            source: (*source).to_string(),
            count: (*count).to_string(),
            target: (*target).to_string(),
        }),
        ["add" | "rm", ..] => Err(CommandError::new(
            "Expected <source> <count> <target> after the subcommand",
        )),
        [other, ..] => Err(CommandError::new(format!("Unknown subcommand: {other}"))),
    }
}

/// Parse and run `args` as issued by `ctx`.
pub fn run(compactor: &mut Compactor, ctx: &mut impl CommandContext, args: &[&str]) -> CommandOutput {
    match parse_command(args) {
        Ok(cmd) => execute_command(compactor, ctx, cmd),
        Err(err) => CommandOutput {
            handled: false,
            lines: vec![format!("Error: {err}")],
        },
    }
}

pub fn execute_command(
    compactor: &mut Compactor,
    ctx: &mut impl CommandContext,
    cmd: CompactCommand,
) -> CommandOutput {
    if !ctx.has_permission(cmd.permission()) {
        return CommandOutput::rejected();
    }
    match cmd {
        CompactCommand::Compact => compact(compactor, ctx),
        CompactCommand::Reload => match compactor.reload() {
            Ok(_) => CommandOutput::handled(vec!["Compactor configuration reloaded".to_string()]),
            Err(err) => {
                warn!("Compactor reload failed: {err:#}");
                CommandOutput::handled(vec![format!(
                    "Compactor configuration could not be reloaded: {err:#}"
                )])
            }
        },
        CompactCommand::Edit {
            kind,
            source,
            count,
            target,
        } => {
            let rule = match RuleTable::validate(compactor.catalog(), &source, &count, &target) {
                Ok(rule) => rule,
                Err(err) => return invalid_rule(err),
            };
            edit(compactor, kind, rule)
        }
    }
}

fn compact(compactor: &Compactor, ctx: &mut impl CommandContext) -> CommandOutput {
    let owner = ctx.sender_name().to_string();
    let mut dropped: Vec<ItemType> = Vec::new();
    let result = {
        let Some(inventory) = ctx.inventory() else {
            return CommandOutput::rejected();
        };
        let mut sink = |item: ItemType, _: &DropOrigin<'_>| dropped.push(item);
        compactor.compact(inventory, &owner, &mut sink)
    };
    for item in dropped {
        ctx.drop_item(item);
    }

    let mut lines: Vec<String> = result
        .reports()
        .iter()
        .filter(|report| report.dropped > 0)
        .map(|report| {
            format!(
                "{} items got dropped on ground, because of insufficient space in inventory.",
                report.dropped
            )
        })
        .collect();
    lines.push("All possible items have been compacted".to_string());
    CommandOutput::handled(lines)
}

fn edit(compactor: &mut Compactor, kind: EditKind, rule: CompactionRule) -> CommandOutput {
    let applied = match kind {
        EditKind::Add => compactor.add_rule(rule),
        EditKind::Remove => compactor.remove_rule(&rule),
    };
    let line = match (kind, applied) {
        (_, Ok(true)) => "Compactor configuration updated!".to_string(),
        (EditKind::Add, Ok(false)) => "This configuration already exists!".to_string(),
        (EditKind::Remove, Ok(false)) => "This configuration wasn't found".to_string(),
        (_, Err(err)) => {
            warn!("Compactor configuration edit failed: {err:#}");
            format!("Compactor configuration could not be updated: {err:#}")
        }
    };
    CommandOutput::handled(vec![line])
}

fn invalid_rule(err: ValidationError) -> CommandOutput {
    CommandOutput {
        handled: false,
        lines: vec![format!("Error: {err}")],
    }
}

/// Tab-completion hints for the argument being typed (the last of `args`).
pub fn complete(catalog: &ItemCatalog, args: &[&str]) -> Vec<String> {
    match args {
        [_] => SUBCOMMANDS.iter().map(|s| s.to_string()).collect(),
        [sub, fragment] | [sub, _, _, fragment] if *sub != "reload" => {
            catalog.suggestions(fragment)
        }
        _ => Vec::new(),
    }
}

pub fn usage_lines() -> Vec<String> {
    vec![
        "Usage:".to_string(),
        "  compact                              compact your inventory".to_string(),
        "  compact reload                       reload the rule configuration".to_string(),
        "  compact add <source> <count> <target>".to_string(),
        "  compact rm <source> <count> <target>".to_string(),
    ]
}
