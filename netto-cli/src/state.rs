//! The saved salary record and its autosave.
//!
//! The record lives in the key-value store under
//! [`STORAGE_KEY`](netto_core::document::STORAGE_KEY). Every change is
//! written back immediately; nothing is held back until an explicit save.

use chrono::{DateTime, Utc};
use netto_core::document::{self, PersistedDocument, STORAGE_KEY};
use netto_core::{DocumentError, EstimateInput, KeyValueStore, StoreError};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

pub struct AppState {
    store: Box<dyn KeyValueStore>,
    input: EstimateInput,
}

impl AppState {
    /// Loads the saved record. A missing key gives the defaults, and so
    /// does a stored document that is no longer JSON.
    pub async fn load(store: Box<dyn KeyValueStore>) -> Result<Self, StateError> {
        let input = match store.get(STORAGE_KEY).await? {
            Some(text) => document::parse_input(&text).unwrap_or_else(|e| {
                warn!("saved document unreadable, using defaults: {e}");
                EstimateInput::default()
            }),
            None => {
                debug!("no saved document, using defaults");
                EstimateInput::default()
            }
        };

        Ok(Self { store, input })
    }

    pub fn input(&self) -> &EstimateInput {
        &self.input
    }

    /// Replaces the record and saves it.
    pub async fn update(
        &mut self,
        input: EstimateInput,
        now: DateTime<Utc>,
    ) -> Result<(), StateError> {
        self.input = input;
        self.save(now).await
    }

    /// Writes the current record with a `savedAt` stamp.
    pub async fn save(
        &self,
        now: DateTime<Utc>,
    ) -> Result<(), StateError> {
        let json = PersistedDocument::for_autosave(self.input.clone(), now).to_json_pretty()?;
        self.store.set(STORAGE_KEY, &json).await?;
        debug!(key = STORAGE_KEY, "autosaved");
        Ok(())
    }

    /// Replaces the record with the one in `text` and saves it.
    ///
    /// On invalid JSON the current record stays as it was.
    pub async fn import(
        &mut self,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<(), StateError> {
        let input = document::parse_input(text)?;
        self.update(input, now).await?;
        info!("imported document");
        Ok(())
    }

    /// Removes the saved record and falls back to the defaults.
    pub async fn reset(&mut self) -> Result<(), StateError> {
        self.store.remove(STORAGE_KEY).await?;
        self.input = EstimateInput::default();
        info!(key = STORAGE_KEY, "reset saved input");
        Ok(())
    }

    /// The export document for the current record.
    pub fn export(
        &self,
        now: DateTime<Utc>,
    ) -> Result<String, StateError> {
        Ok(PersistedDocument::for_export(self.input.clone(), now).to_json_pretty()?)
    }
}
