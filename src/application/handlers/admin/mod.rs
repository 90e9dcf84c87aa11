//! Admin handlers - read-only platform aggregation.

mod platform_stats;
mod recent_activity;

pub use platform_stats::{PlatformStatsHandler, PlatformStatsQuery};
pub use recent_activity::{RecentActivityHandler, RecentActivityQuery};
