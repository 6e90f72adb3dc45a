use std::io::Read;

use transcode::{Operand, Transcoder};

use crate::config::{ConvertArgs, Effective};
use crate::error::CliError;
use crate::model::AnyRecord;

pub fn run(config_path: &str, args: &ConvertArgs) -> Result<(), CliError> {
    let eff = Effective::new(config_path, args)?;
    println!("{}", convert(&eff)?);
    Ok(())
}

fn convert(eff: &Effective) -> Result<String, CliError> {
    let source = AnyRecord::from_json(eff.from, &read_input(&eff.input)?)?;
    let mut destination = match &eff.base {
        Some(path) => AnyRecord::from_json(eff.to, &read_input(path)?)?,
        None => AnyRecord::empty(eff.to),
    };

    transcode_into(&mut destination, &source)?;
    tracing::info!(from = source.name(), to = destination.name(), "converted");
    destination.render(eff.output, eff.pretty)
}

/// Transcodes into a copy of `destination` and swaps it in only if every
/// field converted.
fn transcode_into(destination: &mut AnyRecord, source: &AnyRecord) -> Result<(), CliError> {
    let mut staged = destination.clone();
    Transcoder::global().transcode(
        Operand::record_mut(staged.as_record_mut()),
        Operand::record(source.as_record()),
    )?;
    *destination = staged;
    Ok(())
}

fn read_input(path: &str) -> Result<String, CliError> {
    let mut buf = String::new();
    let read = if path == "-" {
        std::io::stdin().read_to_string(&mut buf)
    } else {
        std::fs::File::open(path).and_then(|mut f| f.read_to_string(&mut buf))
    };
    read.map_err(|source| CliError::Input { path: path.to_string(), source })?;
    Ok(buf)
}
