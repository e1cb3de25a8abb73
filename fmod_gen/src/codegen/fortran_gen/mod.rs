pub mod bridge;
pub mod init;
pub mod module;
pub mod strings;
pub mod types;

pub use bridge::{emit_bridge_routines, emit_print_routine};
pub use init::emit_initializers;
pub use module::{emit_byte_constants, emit_file_footer, emit_file_header, emit_parameters};
pub use strings::emit_string_accessors;
pub use types::emit_derived_type;
