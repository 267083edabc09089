//! Resources of the school REST API

pub mod course;
pub mod order;
pub mod tutor;

pub use course::Course;
pub use order::{BookingTarget, Order, OrderPayload, OrderUpdate};
pub use tutor::Tutor;
