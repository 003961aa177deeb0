pub mod canonicalize;
pub mod diff;
pub mod hash;
pub mod name;
