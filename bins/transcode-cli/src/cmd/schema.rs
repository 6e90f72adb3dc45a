use crate::config::SchemaArgs;
use crate::error::CliError;

pub fn run(args: &SchemaArgs) -> Result<(), CliError> {
    print!("{}", args.record.schema());
    Ok(())
}
