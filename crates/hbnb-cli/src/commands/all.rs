//! All command
//!
//! Usage: hbnb all [CLASS]

use clap::Args;
use hbnb_store::Storage;

use super::{parse_kind, CommandResult};

#[derive(Debug, Args)]
pub struct AllArgs {
    /// Only list this class
    pub class: Option<String>,
}

pub fn execute(args: AllArgs, storage: &mut Storage) -> CommandResult {
    let kind = args.class.as_deref().map(parse_kind).transpose()?;
    for entity in storage.all(kind)?.values() {
        println!("{}", entity);
    }
    Ok(())
}
