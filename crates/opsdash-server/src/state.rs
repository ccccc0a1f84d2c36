use crate::config::ServerConfig;
use crate::templates::TemplateRegistry;
use chrono::{DateTime, Utc};
use opsdash_storage::ReportStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ReportStore>,
    pub templates: Arc<TemplateRegistry>,
    pub config: Arc<ServerConfig>,
    pub start_time: DateTime<Utc>,
}
