use transcode::Transcoder;

use crate::error::CliError;

pub fn run() -> Result<(), CliError> {
    let table = Transcoder::global().rules();
    for (from, to) in table.pairs() {
        println!("{:<20} -> {to}", from.to_string());
    }
    tracing::info!(rules = table.len(), "conversion table");
    Ok(())
}
