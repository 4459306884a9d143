mod pricing;

pub use pricing::*;
