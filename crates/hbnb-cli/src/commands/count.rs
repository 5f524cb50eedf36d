//! Count command
//!
//! Usage: hbnb count [CLASS]

use clap::Args;
use hbnb_store::Storage;

use super::{parse_kind, CommandResult};

#[derive(Debug, Args)]
pub struct CountArgs {
    pub class: Option<String>,
}

pub fn execute(args: CountArgs, storage: &mut Storage) -> CommandResult {
    let kind = args.class.as_deref().map(parse_kind).transpose()?;
    println!("{}", storage.count(kind)?);
    Ok(())
}
