use thiserror::Error;

#[derive(Error, Debug)]
pub enum WizjaError {
    // MPEG-DASH errors
    #[error(transparent)]
    MpdParseError(#[from] dash_mpd::DashMpdError),

    #[error(transparent)]
    UrlParseError(#[from] url::ParseError),
}

pub type WizjaResult<T> = Result<T, WizjaError>;
