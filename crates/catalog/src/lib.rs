mod bootstrap;
mod decode;
mod fallback;
mod lookups;
mod seq;
mod types;

pub use bootstrap::*;
pub use decode::*;
pub use fallback::*;
pub use lookups::*;
pub use seq::*;
pub use types::*;
