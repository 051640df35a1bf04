use std::sync::Arc;

use crate::cache::QueryCache;
use crate::config::DataServiceConfig;
use crate::service::{CommentService, RestCommentService};

/// Application-wide services, provided through the context
#[derive(Clone)]
pub struct GlobalState {
    pub comment_service: Arc<dyn CommentService>,
    pub query_cache: QueryCache,
}

impl GlobalState {
    pub fn new(comment_service: Arc<dyn CommentService>) -> Self {
        Self {
            comment_service,
            query_cache: QueryCache::new(),
        }
    }
}

/// Services backed by the data service, along with the REST client to manage sessions
#[derive(Clone)]
pub struct DataServiceState {
    pub config: DataServiceConfig,
    pub rest_service: Arc<RestCommentService>,
}

impl DataServiceState {
    pub fn new(config: DataServiceConfig) -> Self {
        Self {
            rest_service: Arc::new(RestCommentService::new(config.clone())),
            config,
        }
    }

    pub fn global_state(&self) -> GlobalState {
        GlobalState::new(self.rest_service.clone())
    }
}
