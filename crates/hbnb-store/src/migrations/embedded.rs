//! Embedded SQL migrations
//!
//! Migrations are embedded at compile time using include_str!

/// Migration metadata
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// Get all embedded migrations in order
pub fn get_migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_initial_schema",
        sql: include_str!("../../migrations/001_initial_schema.sql"),
    }]
}

/// Every table the migrations create, children before parents
pub const TABLES_DROP_ORDER: &[&str] = &[
    "place_amenity",
    "reviews",
    "places",
    "cities",
    "amenities",
    "states",
    "users",
    "schema_version",
];
