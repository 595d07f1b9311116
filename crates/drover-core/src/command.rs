//! # Command Registry
//!
//! A minimal command table and the existence probe built on top of it.
//!
//! Lookups report two kinds of failure: the name is malformed, or it is well
//! formed but unknown. [`has_registered_command`] turns only the second into
//! `false`; a malformed name is still an error for the caller.

use crate::{CommandError, Phase};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// COMMAND INFO
// =============================================================================

/// What the registry knows about a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInfo {
    /// The command name, e.g. `cache:rebuild`.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// The phase the host must reach before running this command.
    pub bootstrap: Phase,
}

impl CommandInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, bootstrap: Phase) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            bootstrap,
        }
    }
}

// =============================================================================
// LOOKUP
// =============================================================================

/// Anything commands can be looked up in.
pub trait CommandLookup {
    fn get(&self, name: &str) -> Result<&CommandInfo, CommandError>;
}

/// Check whether `name` is registered in `lookup`.
///
/// `NotFound` becomes `Ok(false)`. Every other failure is returned as is.
pub fn has_registered_command(
    lookup: &dyn CommandLookup,
    name: &str,
) -> Result<bool, CommandError> {
    match lookup.get(name) {
        Ok(_) => Ok(true),
        Err(CommandError::NotFound(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Validate a command name: non-empty, `[a-z0-9:-]`, and not starting or
/// ending with a separator.
pub fn validate_command_name(name: &str) -> Result<(), CommandError> {
    let invalid = |reason: &str| CommandError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name must not be empty"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ':' || c == '-')
    {
        return Err(invalid("name must contain only [a-z0-9:-]"));
    }
    if name.starts_with([':', '-']) || name.ends_with([':', '-']) {
        return Err(invalid("name must not start or end with a separator"));
    }
    Ok(())
}

// =============================================================================
// COMMAND TABLE
// =============================================================================

/// In-memory command registry keyed by name.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    commands: BTreeMap<String, CommandInfo>,
}

impl CommandTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command. The name is validated; re-registering a name replaces
    /// the earlier entry.
    pub fn register(&mut self, info: CommandInfo) -> Result<(), CommandError> {
        validate_command_name(&info.name)?;
        self.commands.insert(info.name.clone(), info);
        Ok(())
    }

    /// All commands in name order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandInfo> {
        self.commands.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl CommandLookup for CommandTable {
    fn get(&self, name: &str) -> Result<&CommandInfo, CommandError> {
        validate_command_name(name)?;
        self.commands
            .get(name)
            .ok_or_else(|| CommandError::NotFound(name.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
