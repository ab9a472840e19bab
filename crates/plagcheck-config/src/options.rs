use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Default similarity threshold: a pair counts as suspicious at
/// `>= 0.5`.
pub const DEFAULT_THRESHOLD: f64 = 0.5;
/// Default k-gram length.
pub const DEFAULT_KGRAM_LENGTH: usize = 25;
/// Default winnowing window size.
pub const DEFAULT_WINDOW_SIZE: usize = 40;
/// Default absolute frequency cap, `F_abs`.
pub const DEFAULT_FREQ_ABS_CAP: usize = 10;
/// Default relative frequency cap, `F_rel`.
pub const DEFAULT_FREQ_REL_CAP: f64 = 0.5;
/// Default per-pair match-event cap, `M_cap`.
pub const DEFAULT_MATCH_EVENT_CAP: usize = 100_000;

/// A cheap, cloneable cooperative-cancellation handle.
///
/// Workers check `is_cancelled()` at coarse boundaries — after each
/// file's tokenization, after each file's fingerprinting, after each
/// surviving bucket is aggregated, and before each pair's fragment
/// reconstruction — rather than being interrupted mid-operation.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Options controlling one `analyze` call.
///
/// `cancellation` is excluded from (de)serialization — it's a runtime
/// handle, not a persisted setting; `serde`'s `skip` leaves it at
/// `Option::default()` (`None`) on deserialize, same as any caller that
/// doesn't need cancellation support.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeOptions {
    pub threshold: f64,
    pub kgram_length: usize,
    pub window_size: usize,
    pub freq_abs_cap: usize,
    pub freq_rel_cap: f64,
    pub match_event_cap: usize,
    #[serde(skip)]
    pub cancellation: Option<CancellationToken>,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            kgram_length: DEFAULT_KGRAM_LENGTH,
            window_size: DEFAULT_WINDOW_SIZE,
            freq_abs_cap: DEFAULT_FREQ_ABS_CAP,
            freq_rel_cap: DEFAULT_FREQ_REL_CAP,
            match_event_cap: DEFAULT_MATCH_EVENT_CAP,
            cancellation: None,
        }
    }
}

impl AnalyzeOptions {
    /// Validate the bounds that are fatal `InvalidConfig` conditions,
    /// before any pipeline work starts. Returns a
    /// human-readable description of the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        if self.kgram_length < 1 {
            return Err(format!(
                "kgram_length must be >= 1, got {}",
                self.kgram_length
            ));
        }
        if self.window_size < 1 {
            return Err(format!("window_size must be >= 1, got {}", self.window_size));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(format!("threshold must be in [0,1], got {}", self.threshold));
        }
        if !(0.0..=1.0).contains(&self.freq_rel_cap) {
            return Err(format!(
                "freq_rel_cap must be in [0,1], got {}",
                self.freq_rel_cap
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let opts = AnalyzeOptions::default();
        assert_eq!(opts.threshold, 0.5);
        assert_eq!(opts.kgram_length, 25);
        assert_eq!(opts.window_size, 40);
        assert_eq!(opts.freq_abs_cap, 10);
        assert_eq!(opts.freq_rel_cap, 0.5);
        assert_eq!(opts.match_event_cap, 100_000);
    }

    #[test]
    fn default_options_validate_successfully() {
        assert!(AnalyzeOptions::default().validate().is_ok());
    }

    #[test]
    fn rejects_kgram_length_below_one() {
        let opts = AnalyzeOptions {
            kgram_length: 0,
            ..AnalyzeOptions::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn rejects_window_size_below_one() {
        let opts = AnalyzeOptions {
            window_size: 0,
            ..AnalyzeOptions::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let opts = AnalyzeOptions {
            threshold: 1.5,
            ..AnalyzeOptions::default()
        };
        assert!(opts.validate().is_err());
        let opts = AnalyzeOptions {
            threshold: -0.1,
            ..AnalyzeOptions::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn cancellation_token_starts_uncancelled() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn cancellation_token_is_observed_through_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }
}
