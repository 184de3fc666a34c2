//! # formkit-cli
//!
//! The `formkit` command-line tool.
//!
//! - **Command framework** - [`ManagementCommand`] and [`CommandRegistry`]
//! - **Built-in commands** - `runserver`, `schema`, `check`
//!
//! ```rust
//! use formkit_cli::command::CommandRegistry;
//! use formkit_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//! assert_eq!(registry.list_commands(), vec!["check", "runserver", "schema"]);
//! ```

#![allow(clippy::unused_async)]

pub mod command;
pub mod commands;

pub use command::{load_settings, CommandRegistry, ManagementCommand};
