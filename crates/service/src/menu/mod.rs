//! Menus scoped to a store.

pub mod domain;
pub mod repository;
pub mod seaorm;
pub mod service;

pub use seaorm::SeaOrmMenuRepository;
pub use service::MenuService;
