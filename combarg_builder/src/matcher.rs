mod core;
mod model;
mod validate;

pub(crate) use model::*;
