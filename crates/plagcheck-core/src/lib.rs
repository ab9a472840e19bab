//! # plagcheck-core
//!
//! The facade: `analyze()` runs the full pipeline (tokenize, fingerprint,
//! index, filter, aggregate, reconstruct, score) over one `AnalyzeRequest`
//! and hands back an immutable `Report`. Everything downstream of a
//! submitted file set is orchestrated here; no other crate knows the
//! stage order.

mod analyze;
mod error;
mod facade;
mod report_id;
mod request;

pub use analyze::analyze;
pub use error::PlagCheckError;
pub use facade::PlagCheck;
pub use request::{AnalyzeRequest, InputFile};

pub use plagcheck_config::{AnalyzeOptions, CancellationToken};
pub use plagcheck_report::{FileView, FragmentView, PairDetail, PairView, Report, ReportCache};
pub use plagcheck_score::Summary;
pub use plagcheck_types::Language;
