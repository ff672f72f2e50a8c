//! File-backed JSON record storage for small local applications.
//! Each entity type owns one `<name>.json` file holding its whole collection.

pub mod codec;
pub mod config;
pub mod fs;
pub mod logging;
pub mod model;
pub mod repo;

pub use codec::{decode_collection, encode_collection, CodecError, CodecResult};
pub use config::{ConfigError, StoreConfig};
pub use fs::{store_file_path, FileSystem, StdFileSystem};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::entity::{Entity, Identifier};
pub use repo::error::{StoreError, StoreResult};
pub use repo::record_repo::{RecordRepository, RecordStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
