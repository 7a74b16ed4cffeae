use core::error::Error;
use pisserror::Error;

/// Things the remote tag store can do to ruin your day.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Couldn't reach the tag store. See: `{_0}`")]
    Unreachable(String),

    #[error("The tag store rejected our credentials. See: `{_0}`")]
    Auth(String),

    /// The store's uniqueness constraint on (category, owner, name) fired.
    /// Callers should treat this as "the tag is already there", not as a
    /// real failure.
    #[error("A tag row with this category, owner, and name already exists.")]
    AlreadyExists,

    #[error("The tag store rejected the request. Status: `{status}`, body: `{body}`")]
    Rejected { status: u16, body: String },

    #[error("The tag store returned a row we couldn't make sense of. See: `{_0}`")]
    MalformedRow(String),
}
