use derive_more::{Display, Error, From};

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the reader. A region or template that simply does not
/// match is never an error, it yields an empty result instead.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The template source produced nothing, so no detection is possible.
    #[display("no tile templates available")]
    NoTemplates,
    /// A tile name token that is neither `<suit><digit>` nor `<suit>_<word>`.
    #[display("invalid tile encoding {token:?}")]
    InvalidTileEncoding { token: String },
    #[display("at most {max} dora indicators can be revealed")]
    DoraOverflow { max: usize },
    #[display("invalid config: {reason}")]
    InvalidConfig { reason: String },
    #[display("image error: {_0}")]
    #[from]
    Image(image::ImageError),
    #[display("config parse error: {_0}")]
    #[from]
    Config(serde_json::Error),
    #[display("io error: {_0}")]
    #[from]
    Io(std::io::Error),
}

impl Error {
    pub(crate) fn invalid_tile(token: impl Into<String>) -> Self {
        Self::InvalidTileEncoding { token: token.into() }
    }
}
