pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_reflects_database() {
        assert_eq!(types::Health::from_db_reachable(true).status, "ok");
        let down = types::Health::from_db_reachable(false);
        assert_eq!((down.status, down.database), ("degraded", "down"));
    }
}
