//! Destroy command
//!
//! Usage: hbnb destroy <CLASS> <ID>
//!
//! Dependents go with the instance (a State takes its Cities, their Places
//! and Reviews).

use clap::Args;
use hbnb_store::Storage;

use super::{fetch, parse_kind, CommandResult};

#[derive(Debug, Args)]
pub struct DestroyArgs {
    pub class: String,
    pub id: String,
}

pub fn execute(args: DestroyArgs, storage: &mut Storage) -> CommandResult {
    let kind = parse_kind(&args.class)?;
    let entity = fetch(storage, kind, &args.id)?;
    storage.delete(&entity)?;
    storage.save()?;
    Ok(())
}
