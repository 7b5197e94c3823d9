//! Stores: creation, store login and per-seller listing.

pub mod domain;
pub mod repository;
pub mod seaorm;
pub mod service;

pub use seaorm::SeaOrmStoreRepository;
pub use service::StoreService;
