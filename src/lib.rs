// SPDX-License-Identifier: MPL-2.0

//! Client core for a social-networking app backed by a hosted Postgres
//! REST service. The crate owns the typed store boundary, the session
//! hand-off, and the feed / network / profile view controllers; widget
//! shells sit on top and stay out of this crate.

pub mod app;
pub mod config;
pub mod runtime;
pub mod store;
pub mod timefmt;
pub mod views;

pub use app::{App, Page};
pub use store::{HttpStore, RelationshipStore, Session, StoreError};
pub use views::{FeedController, NetworkController, NetworkTab, ProfileController};
