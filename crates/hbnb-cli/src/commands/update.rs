//! Update command
//!
//! Usage: hbnb update <CLASS> <ID> <ATTRIBUTE> <VALUE>

use clap::Args;
use hbnb_store::Storage;

use super::{fetch, parse_kind, CommandResult};
use crate::params::{apply, Param};

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub class: String,
    pub id: String,
    pub attribute: String,
    pub value: String,
}

pub fn execute(args: UpdateArgs, storage: &mut Storage) -> CommandResult {
    let kind = parse_kind(&args.class)?;
    let entity = fetch(storage, kind, &args.id)?;

    let mut updated = apply(&entity, &[Param::new(args.attribute, args.value)])?;
    storage.persist(&mut updated)?;
    Ok(())
}
