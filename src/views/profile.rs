// SPDX-License-Identifier: MPL-2.0

//! Own-profile view with an edit mode and partial field updates.

use crate::store::{Profile, ProfileChanges, RelationshipStore, Session, StoreError};
use std::sync::Arc;
use tracing::warn;

pub struct ProfileController<S> {
    store: Arc<S>,
    session: Session,
    pub profile: Option<Profile>,
    pub editing: bool,
    pub loading: bool,
}

impl<S: RelationshipStore> ProfileController<S> {
    pub fn new(store: Arc<S>, session: Session) -> Self {
        Self {
            store,
            session,
            profile: None,
            editing: false,
            loading: false,
        }
    }

    /// Fetch the session user's profile row. Failures are logged and any
    /// previously loaded profile is kept.
    pub async fn load(&mut self) {
        self.loading = true;
        match self.store.profile_by_id(&self.session.user_id).await {
            Ok(profile) => self.profile = profile,
            Err(e) => warn!("failed to load profile: {e}"),
        }
        self.loading = false;
    }

    pub fn begin_edit(&mut self) {
        self.editing = true;
    }

    pub fn cancel_edit(&mut self) {
        self.editing = false;
    }

    /// Push the edited fields to the store and merge them into the local
    /// copy. Edit mode only closes on success, so a failed save leaves the
    /// form open with its contents intact.
    pub async fn save(&mut self, changes: ProfileChanges) {
        self.loading = true;
        match self.try_save(&changes).await {
            Ok(()) => self.editing = false,
            Err(e) => warn!("failed to update profile: {e}"),
        }
        self.loading = false;
    }

    async fn try_save(&mut self, changes: &ProfileChanges) -> Result<(), StoreError> {
        self.store
            .update_profile(&self.session.user_id, changes)
            .await?;
        if let Some(profile) = &mut self.profile {
            merge(profile, changes);
        }
        Ok(())
    }
}

fn merge(profile: &mut Profile, changes: &ProfileChanges) {
    if let Some(full_name) = &changes.full_name {
        profile.full_name = full_name.clone();
    }
    if changes.headline.is_some() {
        profile.headline = changes.headline.clone();
    }
    if changes.location.is_some() {
        profile.location = changes.location.clone();
    }
    if changes.about.is_some() {
        profile.about = changes.about.clone();
    }
    if changes.avatar_url.is_some() {
        profile.avatar_url = changes.avatar_url.clone();
    }
    if changes.banner_url.is_some() {
        profile.banner_url = changes.banner_url.clone();
    }
}
