use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::rules::RiskCategory;

#[derive(Debug, Default, Clone, Serialize)]
pub struct MetricsData {
    /// Keyed by "ok" or the error tag.
    pub relay_outcomes: HashMap<String, u64>,
    pub risk_lookups: HashMap<String, u64>,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    pub async fn record_relay<T>(&self, outcome: &Result<T, AppError>) {
        let tag = match outcome {
            Ok(_) => "ok",
            Err(e) => e.kind().as_str(),
        };
        let mut data = self.inner.write().await;
        *data.relay_outcomes.entry(tag.to_string()).or_insert(0) += 1;
    }

    pub async fn record_lookup(&self, category: RiskCategory) {
        let mut data = self.inner.write().await;
        *data
            .risk_lookups
            .entry(category.as_str().to_string())
            .or_insert(0) += 1;
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}
