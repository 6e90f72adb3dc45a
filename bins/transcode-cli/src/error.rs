#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Config(String),

    #[error("input '{path}': {source}")]
    Input {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{record}: {source}")]
    Parse {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("output {format} is not available for {record}")]
    UnsupportedOutput { format: &'static str, record: &'static str },

    #[error("transcode: {0}")]
    Transcode(#[from] transcode::TranscodeError),

    #[error("render: {0}")]
    Render(#[from] serde_json::Error),
}
