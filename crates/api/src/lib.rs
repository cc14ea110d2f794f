//! Typed command and query interface for editor operations.
//!
//! Commands are intent-based and serializable, so the same operations can
//! be driven from a surface, a script, or recorded and replayed. The
//! executor connects them to a live [`canvas::EditorCanvas`].

mod command;
mod executor;
mod query;
mod target;

pub use command::*;
pub use executor::{execute_command, execute_query};
pub use query::*;
pub use target::*;
