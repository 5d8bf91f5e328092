pub mod inspect;

pub use inspect::{InspectCommand, handle_inspect_command};
