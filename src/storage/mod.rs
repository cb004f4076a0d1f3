pub mod buffer;
pub mod debug;

pub use buffer::{AsBuffer, Buffer};
pub use debug::debug_buffer;
