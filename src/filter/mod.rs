pub mod compact;
pub mod marker;
pub mod stage;

pub use compact::{compact, Mode, Session};
pub use marker::{SC_OFF, SC_ON};
pub use stage::CompactFilter;
