//! The bound object graph and the passes that shape and fill it.
//!
//! Binding walks the merged document in lock-step with an object graph whose
//! collections were already sized by the shaping constructor: attributes land
//! on scalar members, child elements recurse into sub-objects, and repeated
//! same-tag children are consumed positionally against collection members.

mod binder;
mod construct;
mod object;

pub use binder::bind;
pub use construct::construct_object;
pub use object::{BoundObject, BoundValue};
