//! Mail provider implementations.
//!
//! This module contains the [`MailProvider`] trait defining the capability
//! surface the mailbox operations depend on, along with concrete
//! implementations (currently Gmail).

mod gmail;
mod traits;

pub use gmail::{GmailCredentials, GmailProvider};
pub use traits::{
    Header, MailProvider, MessageHandle, MessageMetadata, MimeBody, MimePart, ProviderError,
    Result, ThreadEntry,
};
