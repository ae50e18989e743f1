mod redis_probe;

pub use redis_probe::RedisStoreProbe;
