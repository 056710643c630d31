pub mod file;
pub mod listing_store;
pub mod memory;
pub mod traits;

pub use file::FileStorage;
pub use listing_store::ListingStore;
pub use memory::MemoryStorage;
pub use traits::Storage;
