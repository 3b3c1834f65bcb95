// Service exports
pub mod cache;
pub mod postgres;

pub use cache::{CacheManager, CacheKey, CacheError, SHARED_L1_TTL_SECS};
pub use postgres::{PostgresClient, PostgresError};
