use std::{error::Error, fmt};

pub mod collector;
pub mod realtime;

pub mod sources {
    /// # Vitalis Poitiers
    ///
    /// Realtime vehicle feed of the Vitalis network in Poitiers, published
    /// on transport.data.gouv.fr.
    pub const VITALIS_POITIERS_REALTIME: &str =
        "https://transport.data.gouv.fr/resources/83390/download";
}

/// Failure of one fetch-and-decode cycle. Never fatal: the supervisor logs
/// it and the next tick tries again.
#[derive(Debug)]
pub enum FeedError {
    Http(reqwest::Error),
    Status(u16),
    Decode(prost::DecodeError),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Http(why) => write!(f, "feed request failed: {}", why),
            FeedError::Status(status) => write!(f, "feed returned HTTP {}", status),
            FeedError::Decode(why) => {
                write!(f, "feed payload did not decode: {}", why)
            }
        }
    }
}

impl Error for FeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FeedError::Http(why) => Some(why),
            FeedError::Status(_) => None,
            FeedError::Decode(why) => Some(why),
        }
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(why: reqwest::Error) -> Self {
        Self::Http(why)
    }
}

impl From<prost::DecodeError> for FeedError {
    fn from(why: prost::DecodeError) -> Self {
        Self::Decode(why)
    }
}
