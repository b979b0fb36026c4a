pub mod error;
pub mod key;
pub mod store;
pub mod couch;
pub mod dir;
pub mod memory;
pub mod fixtures;

pub use couch::{CouchConfig, CouchStore};
pub use dir::DirStore;
pub use error::{Result, StoreError};
pub use key::{index_key, parse_key, KEY_WIDTH};
pub use memory::MemoryStore;
pub use store::{decode_record, encode_record, DocumentStore};
