//! Show command
//!
//! Usage: hbnb show <CLASS> <ID>

use clap::Args;
use hbnb_store::Storage;

use super::{fetch, parse_kind, CommandResult};

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub class: String,
    pub id: String,
}

pub fn execute(args: ShowArgs, storage: &mut Storage) -> CommandResult {
    let kind = parse_kind(&args.class)?;
    let entity = fetch(storage, kind, &args.id)?;
    println!("{}", entity);
    Ok(())
}
