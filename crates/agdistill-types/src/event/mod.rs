pub mod hook;
pub mod link;
pub mod raw;

pub use hook::*;
pub use link::*;
pub use raw::*;
