//! Create command
//!
//! Usage: hbnb create <CLASS> [key=value]...

use clap::Args;
use hbnb_core::model::{Amenity, City, Entity, Kind, Place, Review, State, User};
use hbnb_store::Storage;

use super::{parse_kind, CommandResult};
use crate::params::{apply, parse_param, Param};

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Class name (User, State, City, Place, Review, Amenity)
    pub class: String,

    /// Attributes as key=value; quote strings, `_` stands for a space
    pub params: Vec<String>,
}

fn blank(kind: Kind) -> Entity {
    match kind {
        Kind::User => User::default().into(),
        Kind::State => State::default().into(),
        Kind::City => City::default().into(),
        Kind::Place => Place::default().into(),
        Kind::Review => Review::default().into(),
        Kind::Amenity => Amenity::default().into(),
    }
}

/// Execute create: print the new id
pub fn execute(args: CreateArgs, storage: &mut Storage) -> CommandResult {
    let kind = parse_kind(&args.class)?;
    let params: Vec<Param> = args.params.iter().filter_map(|p| parse_param(p)).collect();

    let mut entity = apply(&blank(kind), &params)?;
    storage.persist(&mut entity)?;

    println!("{}", entity.id());
    Ok(())
}
