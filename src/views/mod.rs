// SPDX-License-Identifier: MPL-2.0

mod feed;
mod network;
mod profile;

pub use feed::FeedController;
pub use network::{NetworkController, NetworkTab};
pub use profile::ProfileController;
