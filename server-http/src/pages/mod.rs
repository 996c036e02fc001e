pub mod dashboard;
pub mod experience;
pub mod layout;

pub use layout::PageContext;
