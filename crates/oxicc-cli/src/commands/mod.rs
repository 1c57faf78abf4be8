//! Command implementations for the oxicc CLI.

mod dump;
mod edit;
mod info;

pub use dump::cmd_dump;
pub use edit::{EditArgs, cmd_edit, parse_key_value};
pub use info::cmd_info;
