pub mod app_config;
pub mod database;
pub mod redis_repo;
pub mod tour_repo;
pub mod memory_repo;

pub use database::DbClient;
pub use redis_repo::RedisClient;
pub use tour_repo::PostgresTourRepository;
pub use memory_repo::InMemoryTourRepository;
