pub mod bridge;
pub mod instance;
pub mod print;
pub mod strings;
pub mod types;

pub use bridge::{emit_bridge_declarations, emit_field_transfer_helpers, emit_memory_helpers};
pub use instance::emit_instance;
pub use print::emit_print_fn;
pub use strings::emit_string_helpers;
pub use types::{emit_parameters, emit_struct};
