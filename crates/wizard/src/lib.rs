mod action;
mod controller;
mod draft;
mod draft_store;
mod memory;
mod store;
mod validate;

pub use action::*;
pub use controller::*;
pub use draft::*;
pub use draft_store::*;
pub use memory::*;
pub use store::*;
pub use validate::*;
