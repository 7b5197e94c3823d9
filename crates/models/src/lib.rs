pub mod errors;
pub mod db;
pub mod food_category;
pub mod seller;
pub mod image;
pub mod store;
pub mod menu;

pub use food_category::FoodCategory;

#[cfg(test)]
mod tests;
