//! Read-only data access layer for the reporting dashboard.
//!
//! All tables are externally owned: an out-of-scope ingestion pipeline
//! creates and fills them, and this crate never inserts, updates, or
//! deletes rows. The only write path is the idempotent schema creation
//! run by the `migration` crate at [`store::ReportStore::new`].

pub mod entities;
pub mod store;


pub use store::{
    AlarmStatisticsRow, DailyStatisticsRow, GridRow, GridSource, GroupField, ReportStore,
    DAYS_IN_PIVOT, FIRING_STATUS,
};
