mod binary;
mod hex;
mod text;

pub use binary::*;
pub use text::*;
