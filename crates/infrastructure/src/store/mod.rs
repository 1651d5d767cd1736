mod http_store;
mod in_memory;

pub use http_store::HttpRecordStore;
pub use in_memory::InMemoryRecordStore;
