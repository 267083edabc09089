//! Catalog browsing: search filters and page slicing for the listing views

pub mod filter;
pub mod pagination;

pub use filter::{level_badge, CourseFilter, TutorFilter};
pub use pagination::{paginate, Page};

pub const COURSES_PER_PAGE: usize = 10;
pub const ORDERS_PER_PAGE: usize = 5;
