use thiserror::Error;

use crate::image::ImageError;
use crate::remote::RemoteError;
use crate::validate::ValidationError;
use store::StoreError;

/// Top-level error for a sign-up or sign-in attempt.
///
/// Wrapped errors keep their own user-facing messages; `Display` on this
/// type is what the frontend surfaces as a toast.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The gate refused re-entry: a submission is already in flight.
    #[error("a submission is already in progress")]
    InFlight,
}
