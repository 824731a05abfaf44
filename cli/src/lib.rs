//! Command line collaborator around `shortlist-core`: gathers candidate
//! texts from disk and writes ranking reports.

pub mod collect;
pub mod report;
