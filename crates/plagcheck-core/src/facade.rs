use std::sync::Arc;

use plagcheck_report::{Report, ReportCache};

use crate::analyze::analyze;
use crate::error::PlagCheckError;
use crate::request::AnalyzeRequest;

/// A `plagcheck` instance: `analyze()` plus the bounded report cache it
/// populates. Owning the cache here, rather than reaching for a
/// process-global one inside `plagcheck-report`, is what lets a caller
/// run several independent instances (e.g. one per tenant) without their
/// caches interfering.
pub struct PlagCheck {
    cache: ReportCache,
}

impl PlagCheck {
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cache: ReportCache::new(cache_capacity),
        }
    }

    /// Run `analyze` and cache the result under its generated
    /// `report_id`. A caller that doesn't want caching can call
    /// `plagcheck_core::analyze` directly instead.
    pub fn analyze(&self, request: AnalyzeRequest) -> Result<Arc<Report>, PlagCheckError> {
        let report = analyze(request)?;
        self.cache.insert(Arc::clone(&report));
        Ok(report)
    }

    pub fn get_cached(&self, report_id: &str) -> Option<Arc<Report>> {
        self.cache.get(report_id)
    }
}

impl Default for PlagCheck {
    /// `0` falls back to `ReportCache`'s own default capacity.
    fn default() -> Self {
        Self::new(0)
    }
}
