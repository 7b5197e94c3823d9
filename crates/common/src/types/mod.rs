use serde::Serialize;

/// Body of `GET /health`.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Health {
    pub status: &'static str,
    pub database: &'static str,
}

impl Health {
    pub fn from_db_reachable(reachable: bool) -> Self {
        if reachable {
            Self { status: "ok", database: "up" }
        } else {
            Self { status: "degraded", database: "down" }
        }
    }
}
