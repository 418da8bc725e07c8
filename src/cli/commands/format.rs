//! Format and parse commands.

use anyhow::Result;
use fxcalc_format::{parse_digits, to_display_string};

use crate::cli::{FormatArgs, ParseArgs};

pub async fn run(args: FormatArgs) -> Result<()> {
    println!("{}", to_display_string(Some(args.amount)));
    Ok(())
}

pub async fn run_parse(args: ParseArgs) -> Result<()> {
    println!("{}", parse_digits(&args.text));
    Ok(())
}
