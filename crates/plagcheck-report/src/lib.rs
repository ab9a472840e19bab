//! # plagcheck-report
//!
//! The report model: files, pairs, and on-demand fragment detail,
//! plus the bounded in-memory LRU cache that keeps built reports
//! retrievable by id after `analyze` returns.
//!
//! This crate does not itself run the pipeline — `plagcheck-core`
//! assembles a `Report` from the output of every upstream stage and
//! hands it to a `ReportCache`.

mod cache;
mod report;

pub use cache::ReportCache;
pub use plagcheck_score::Summary;
pub use report::{FileView, FragmentView, PairDetail, PairInput, PairView, Report};
