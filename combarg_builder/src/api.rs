mod combinator;
mod core;
mod parameter;

pub use self::core::*;
pub use combinator::*;
pub use parameter::*;
