//! Command implementations for OxiCBZ CLI.

pub mod info;
pub mod list;
pub mod pack;
pub mod verify;

pub use info::cmd_info;
pub use list::cmd_list;
pub use pack::{PackOptions, cmd_pack};
pub use verify::cmd_verify;
