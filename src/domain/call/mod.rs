//! Call bounded context - call records and the events embedded in them

pub mod aggregate;
pub mod event;
pub mod value_object;

pub use aggregate::{elapsed_seconds, Call};
pub use event::CallEvent;
pub use value_object::CallStatus;
