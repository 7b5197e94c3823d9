//! Seller accounts: registration, lookup, login and business-number checks.

pub mod domain;
pub mod registry;
pub mod repository;
pub mod seaorm;
pub mod service;

pub use registry::BusinessRegistryClient;
pub use seaorm::SeaOrmSellerRepository;
pub use service::SellerService;
