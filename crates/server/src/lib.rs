pub mod errors;
pub mod forms;
pub mod openapi;
pub mod routes;
pub mod session;
pub mod startup;
pub mod state;
pub mod views;

pub use startup::run;
