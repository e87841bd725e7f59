//! Service context - dependency container for services
//!
//! Holds the reaction store, the read-side reader and the post/user
//! collaborators, all as trait objects so the backend is chosen at startup.

use std::sync::Arc;

use reaction_common::ReactionConfig;
use reaction_core::{PostDirectory, ReactionReader, ReactionStore, UserDirectory};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Write side
    reaction_store: Arc<dyn ReactionStore>,

    // Read side, possibly a replica
    reaction_reader: Arc<dyn ReactionReader>,

    // Collaborators
    post_directory: Arc<dyn PostDirectory>,
    user_directory: Arc<dyn UserDirectory>,

    config: ReactionConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        reaction_store: Arc<dyn ReactionStore>,
        reaction_reader: Arc<dyn ReactionReader>,
        post_directory: Arc<dyn PostDirectory>,
        user_directory: Arc<dyn UserDirectory>,
        config: ReactionConfig,
    ) -> Self {
        Self {
            reaction_store,
            reaction_reader,
            post_directory,
            user_directory,
            config,
        }
    }

    /// Get the reaction store (primary)
    pub fn reaction_store(&self) -> &dyn ReactionStore {
        self.reaction_store.as_ref()
    }

    /// Get the reaction reader
    pub fn reaction_reader(&self) -> &dyn ReactionReader {
        self.reaction_reader.as_ref()
    }

    /// Get the post collaborator
    pub fn post_directory(&self) -> &dyn PostDirectory {
        self.post_directory.as_ref()
    }

    /// Get the user collaborator
    pub fn user_directory(&self) -> &dyn UserDirectory {
        self.user_directory.as_ref()
    }

    /// Coordinator and query tuning
    pub fn config(&self) -> &ReactionConfig {
        &self.config
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("reaction_store", &"dyn ReactionStore")
            .field("reaction_reader", &"dyn ReactionReader")
            .field("collaborators", &"...")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    reaction_store: Option<Arc<dyn ReactionStore>>,
    reaction_reader: Option<Arc<dyn ReactionReader>>,
    post_directory: Option<Arc<dyn PostDirectory>>,
    user_directory: Option<Arc<dyn UserDirectory>>,
    config: Option<ReactionConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reaction_store(mut self, store: Arc<dyn ReactionStore>) -> Self {
        self.reaction_store = Some(store);
        self
    }

    pub fn reaction_reader(mut self, reader: Arc<dyn ReactionReader>) -> Self {
        self.reaction_reader = Some(reader);
        self
    }

    pub fn post_directory(mut self, directory: Arc<dyn PostDirectory>) -> Self {
        self.post_directory = Some(directory);
        self
    }

    pub fn user_directory(mut self, directory: Arc<dyn UserDirectory>) -> Self {
        self.user_directory = Some(directory);
        self
    }

    pub fn config(mut self, config: ReactionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// `config` falls back to its defaults; every store handle is required.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let config = self.config.unwrap_or_default();
        if config.max_attempts == 0 {
            return Err(ServiceError::validation("max_attempts must be at least 1"));
        }

        Ok(ServiceContext::new(
            self.reaction_store
                .ok_or_else(|| ServiceError::validation("reaction_store is required"))?,
            self.reaction_reader
                .ok_or_else(|| ServiceError::validation("reaction_reader is required"))?,
            self.post_directory
                .ok_or_else(|| ServiceError::validation("post_directory is required"))?,
            self.user_directory
                .ok_or_else(|| ServiceError::validation("user_directory is required"))?,
            config,
        ))
    }
}
