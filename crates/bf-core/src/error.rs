use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone)]
pub enum CoreError {
    #[error("Unknown state attribute: {name}")]
    UnknownAttribute { name: String },

    #[error("Missing parameter: {name}")]
    MissingParameter { name: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
