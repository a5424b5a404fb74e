pub mod integration;
pub mod workspace;

pub use integration::{
    AutoSyncSettings, Integration, InvalidSyncInterval, ALLOWED_SYNC_INTERVALS,
    INVALID_SYNC_INTERVAL,
};
pub use workspace::Workspace;
