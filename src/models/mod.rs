pub mod resource;

pub use resource::{LocationPoint, ResourceKind};
