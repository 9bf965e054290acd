pub mod memory;
pub mod rest;

#[cfg(feature = "redis")]
pub mod redis;

pub use memory::MemoryCache;
pub use rest::RestCache;

#[cfg(feature = "redis")]
pub use self::redis::RedisCache;
