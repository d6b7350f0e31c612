mod fnv;
mod hashed;

pub use fnv::*;
pub use hashed::*;
