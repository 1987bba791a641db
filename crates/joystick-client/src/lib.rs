//! REST client and fetch/sync primitives for the Joystick storefront.
//!
//! [`StoreClient`] speaks to the generic JSON data server; [`Resource`]
//! holds the loading/error/payload state each view derives its rendering
//! from. The two are deliberately decoupled: a `Resource` never issues
//! requests itself, it only arbitrates which response is allowed to land.

mod client;
mod error;
mod resource;

pub use client::StoreClient;
pub use error::StoreError;
pub use resource::{FetchTicket, Resource};
