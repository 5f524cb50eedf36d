//! Relational table declarations
//!
//! Column lists per Kind, in the order the migration declares them. The
//! column names are the record attribute names, so a row maps to a record
//! one column at a time.

use hbnb_core::model::Kind;

/// SQLite storage class of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Real,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
}

const fn text(name: &'static str) -> Column {
    Column {
        name,
        ty: ColumnType::Text,
    }
}

const fn integer(name: &'static str) -> Column {
    Column {
        name,
        ty: ColumnType::Integer,
    }
}

const fn real(name: &'static str) -> Column {
    Column {
        name,
        ty: ColumnType::Real,
    }
}

#[derive(Debug)]
pub struct TableDef {
    pub kind: Kind,
    pub name: &'static str,
    pub columns: &'static [Column],
}

/// Columns never rewritten by an upsert
pub const IMMUTABLE_COLUMNS: &[&str] = &["id", "created_at"];

/// Association table linking Places to Amenities
pub const PLACE_AMENITY_TABLE: &str = "place_amenity";

static USERS: TableDef = TableDef {
    kind: Kind::User,
    name: "users",
    columns: &[
        text("id"),
        text("created_at"),
        text("updated_at"),
        text("email"),
        text("password"),
        text("first_name"),
        text("last_name"),
    ],
};

static STATES: TableDef = TableDef {
    kind: Kind::State,
    name: "states",
    columns: &[text("id"), text("created_at"), text("updated_at"), text("name")],
};

static AMENITIES: TableDef = TableDef {
    kind: Kind::Amenity,
    name: "amenities",
    columns: &[text("id"), text("created_at"), text("updated_at"), text("name")],
};

static CITIES: TableDef = TableDef {
    kind: Kind::City,
    name: "cities",
    columns: &[
        text("id"),
        text("created_at"),
        text("updated_at"),
        text("state_id"),
        text("name"),
    ],
};

static PLACES: TableDef = TableDef {
    kind: Kind::Place,
    name: "places",
    columns: &[
        text("id"),
        text("created_at"),
        text("updated_at"),
        text("city_id"),
        text("user_id"),
        text("name"),
        text("description"),
        integer("number_rooms"),
        integer("number_bathrooms"),
        integer("max_guest"),
        integer("price_by_night"),
        real("latitude"),
        real("longitude"),
    ],
};

static REVIEWS: TableDef = TableDef {
    kind: Kind::Review,
    name: "reviews",
    columns: &[
        text("id"),
        text("created_at"),
        text("updated_at"),
        text("place_id"),
        text("user_id"),
        text("text"),
    ],
};

pub fn table_for(kind: Kind) -> &'static TableDef {
    match kind {
        Kind::User => &USERS,
        Kind::State => &STATES,
        Kind::Amenity => &AMENITIES,
        Kind::City => &CITIES,
        Kind::Place => &PLACES,
        Kind::Review => &REVIEWS,
    }
}

impl TableDef {
    /// Comma-separated column list for SELECT / INSERT
    pub fn column_list(&self) -> String {
        self.columns
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `INSERT ... ON CONFLICT(id) DO UPDATE` for one row
    pub fn upsert_sql(&self) -> String {
        let placeholders = (1..=self.columns.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let updates = self
            .columns
            .iter()
            .filter(|c| !IMMUTABLE_COLUMNS.contains(&c.name))
            .map(|c| format!("{0} = excluded.{0}", c.name))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT(id) DO UPDATE SET {}",
            self.name,
            self.column_list(),
            placeholders,
            updates
        )
    }
}
