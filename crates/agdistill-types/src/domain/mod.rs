pub mod backtrack;
pub mod diff;
pub mod duration;
pub mod phase;
pub mod timeline;

pub use backtrack::*;
pub use diff::*;
pub use duration::*;
pub use phase::*;
pub use timeline::*;
