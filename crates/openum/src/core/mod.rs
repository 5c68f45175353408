//! Member registry core shared by every enum variant.

mod append;
mod registry;
mod store;

pub(crate) use registry::{Insertion, OnExisting};
pub use registry::EnumCore;
pub use store::Members;
