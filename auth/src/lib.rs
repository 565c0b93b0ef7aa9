//! # Auth crate — credential validation and session bootstrap
//!
//! This crate is the sign-up/sign-in core of the chat client. It decides when
//! an attempt is well-formed, turns a profile photo into a document-sized
//! blob, talks to the remote user directory through a narrow trait, and
//! establishes the local session on success. It contains no UI; frontends
//! bind their forms and progress indicators to [`SessionBootstrapper`] and
//! its [`Phase`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`validate`] | Ordered, first-failure-wins checks on the form fields |
//! | [`image`] | Profile photo decode, 150-wide preview, JPEG + base64 blob |
//! | [`remote`] | [`DocumentStore`] trait over the remote user directory, with an in-memory backend |
//! | [`bootstrap`] | The attempt state machine: gate, remote call, session write |
//! | [`config`] | Client configuration (collection name, preference file) |

pub mod bootstrap;
pub mod config;
pub mod image;
pub mod remote;
pub mod validate;

mod error;

pub use bootstrap::{LoadingGate, Phase, SessionBootstrapper, SignUpForm};
pub use config::AuthConfig;
pub use error::AuthError;
pub use image::{decode_image, encode_image, ImageError};
pub use remote::{Document, DocumentStore, MemoryDirectory, RemoteError};
pub use validate::{validate_sign_in, validate_sign_up, ValidationError};
