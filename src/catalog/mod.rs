pub mod filter;
pub mod types;
pub mod view;

pub use types::{FilterCriteria, TypeFilter};
pub use view::CatalogView;
