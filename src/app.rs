// SPDX-License-Identifier: MPL-2.0

//! Application shell: the session, the three view controllers, and the
//! active page. Navigation is in-memory tab state only; there is no URL
//! scheme and nothing here is externally addressable.

use crate::store::{RelationshipStore, Session};
use crate::views::{FeedController, NetworkController, ProfileController};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Feed,
    Network,
    Profile,
}

pub struct App<S> {
    session: Session,
    pub page: Page,
    pub feed: FeedController<S>,
    pub network: NetworkController<S>,
    pub profile: ProfileController<S>,
}

impl<S: RelationshipStore> App<S> {
    /// Build the shell around an authenticated session. The store handle
    /// and the session are passed in explicitly; the crate keeps no global
    /// session state.
    pub fn new(store: Arc<S>, session: Session) -> Self {
        Self {
            feed: FeedController::new(Arc::clone(&store), session.clone()),
            network: NetworkController::new(Arc::clone(&store), session.clone()),
            profile: ProfileController::new(store, session.clone()),
            session,
            page: Page::default(),
        }
    }

    pub fn navigate(&mut self, page: Page) {
        self.page = page;
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}
