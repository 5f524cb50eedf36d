//! One module per console verb
//!
//! Every command receives an already reloaded [`Storage`] and writes its
//! result to stdout. Errors use the console's `** message **` form.

use std::error::Error;

use hbnb_core::model::{Entity, Kind};
use hbnb_core::HbErrorKind;
use hbnb_store::Storage;

pub mod all;
pub mod count;
pub mod create;
pub mod destroy;
pub mod show;
pub mod update;

pub type CommandResult = Result<(), Box<dyn Error>>;

pub fn console_error(message: &str) -> Box<dyn Error> {
    format!("** {} **", message).into()
}

/// Resolve a class name to its Kind
pub fn parse_kind(name: &str) -> Result<Kind, Box<dyn Error>> {
    name.parse::<Kind>()
        .map_err(|_| console_error("class doesn't exist"))
}

/// Look an entity up, reporting absence the way the console does
pub fn fetch(storage: &mut Storage, kind: Kind, id: &str) -> Result<Entity, Box<dyn Error>> {
    storage.get(kind, id).map_err(|err| match err.kind() {
        HbErrorKind::NotFound => console_error("no instance found"),
        _ => err.into(),
    })
}
