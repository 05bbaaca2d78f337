//! Command registry
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Ordered registry loaded from a registration table, duplicates rejected
//! - 1.0.0: Initial implementation for handler dispatch

use anyhow::{anyhow, Result};
use log::{debug, error, info, warn};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use super::handler::Command;

type CommandFactory = Box<dyn Fn() -> Result<Arc<dyn Command>> + Send + Sync>;

/// One row of the compiled-in registration table
pub struct CommandEntry {
    id: &'static str,
    factory: CommandFactory,
}

impl CommandEntry {
    pub fn new<F>(id: &'static str, factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn Command>> + Send + Sync + 'static,
    {
        Self {
            id,
            factory: Box::new(factory),
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Construct the handler, turning a panic into an error
    pub fn build(&self) -> Result<Arc<dyn Command>> {
        catch_unwind(AssertUnwindSafe(|| (self.factory)()))
            .map_err(|_| anyhow!("constructor for '{}' panicked", self.id))?
    }
}

/// Ordered, read-only-after-load collection of command handlers
///
/// Lookup is a linear scan in load order; names are unique because
/// duplicates are rejected when registered.
///
/// # Example
///
/// ```ignore
/// let registry = CommandRegistry::load(builtin_commands(&config));
///
/// if let Some(handler) = registry.find_by_name("stats") {
///     handler.run(&ctx, &msg).await?;
/// }
/// ```
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every entry in order, skipping the ones that fail
    ///
    /// A failing or panicking constructor only loses its own command.
    pub fn load<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = CommandEntry>,
    {
        let mut registry = Self::new();
        let mut failed = 0usize;

        for entry in entries {
            match entry.build() {
                Ok(command) => {
                    if !registry.register(command) {
                        failed += 1;
                    }
                }
                Err(e) => {
                    error!("❌ Failed to load command '{}': {e:#}", entry.id());
                    failed += 1;
                }
            }
        }

        info!(
            "📦 Loaded {} commands ({} skipped): {}",
            registry.len(),
            failed,
            registry.command_names().collect::<Vec<_>>().join(", ")
        );
        registry
    }

    /// Append a handler
    ///
    /// Returns false, leaving the registry unchanged, if a handler with the
    /// same name is already registered.
    pub fn register(&mut self, command: Arc<dyn Command>) -> bool {
        let name = command.name();
        if self.contains(name) {
            warn!("⚠️ Duplicate command name '{name}' rejected; keeping the first registration");
            return false;
        }
        debug!("Registering command '{name}'");
        self.commands.push(command);
        true
    }

    /// First handler registered under `name`
    pub fn find_by_name(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands
            .iter()
            .find(|command| command.name() == name)
            .cloned()
    }

    /// Every handler, in load order
    pub fn all(&self) -> &[Arc<dyn Command>] {
        &self.commands
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.iter().any(|command| command.name() == name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|command| command.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::CommandContext;
    use crate::commands::descriptor::CommandDescriptor;
    use crate::platform::IncomingMessage;
    use async_trait::async_trait;

    // Mock handler for testing
    struct MockHandler {
        descriptor: CommandDescriptor,
    }

    impl MockHandler {
        fn named(name: &str, description: &str) -> Arc<dyn Command> {
            Arc::new(MockHandler {
                descriptor: CommandDescriptor::new(name).with_description(description),
            })
        }
    }

    #[async_trait]
    impl Command for MockHandler {
        fn descriptor(&self) -> &CommandDescriptor {
            &self.descriptor
        }

        async fn run(&self, _ctx: &CommandContext, _msg: &IncomingMessage) -> Result<bool> {
            Ok(true)
        }
    }

    fn entry(id: &'static str, description: &'static str) -> CommandEntry {
        CommandEntry::new(id, move || Ok(MockHandler::named(id, description)))
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.find_by_name("ping").is_none());
    }

    #[test]
    fn test_load_preserves_order() {
        let registry = CommandRegistry::load(vec![
            entry("stats", "a"),
            entry("help", "b"),
            entry("ping", "c"),
        ]);

        assert_eq!(
            registry.command_names().collect::<Vec<_>>(),
            vec!["stats", "help", "ping"]
        );
        assert_eq!(registry.all().len(), 3);
    }

    #[test]
    fn test_find_by_name() {
        let registry = CommandRegistry::load(vec![entry("ping", "a"), entry("help", "b")]);

        assert_eq!(registry.find_by_name("help").unwrap().name(), "help");
        assert!(registry.find_by_name("missing").is_none());
        assert!(registry.find_by_name("").is_none());
    }

    #[test]
    fn test_failed_constructor_skips_only_that_entry() {
        let registry = CommandRegistry::load(vec![
            entry("ping", "a"),
            CommandEntry::new("broken", || Err(anyhow!("bad endpoint"))),
            entry("help", "b"),
        ]);

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("ping"));
        assert!(registry.contains("help"));
        assert!(!registry.contains("broken"));
    }

    #[test]
    fn test_panicking_constructor_is_skipped() {
        let registry = CommandRegistry::load(vec![
            CommandEntry::new("explodes", || panic!("constructor blew up")),
            entry("ping", "a"),
        ]);

        assert_eq!(registry.command_names().collect::<Vec<_>>(), vec!["ping"]);
    }

    #[test]
    fn test_duplicate_rejected_first_wins() {
        let registry = CommandRegistry::load(vec![
            entry("stats", "first"),
            entry("stats", "second"),
        ]);

        assert_eq!(registry.len(), 1);
        for _ in 0..3 {
            let found = registry.find_by_name("stats").unwrap();
            assert_eq!(found.descriptor().description(), "first");
        }
    }

    #[test]
    fn test_register_reports_duplicates() {
        let mut registry = CommandRegistry::new();
        assert!(registry.register(MockHandler::named("ping", "a")));
        assert!(!registry.register(MockHandler::named("ping", "b")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_default() {
        let registry = CommandRegistry::default();
        assert!(registry.is_empty());
    }
}
