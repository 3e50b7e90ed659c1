// Best-effort mirror of a new identity into the local user store

use tracing::{info, warn};

use crate::api::types::ProfileFields;
use crate::api::ProfileSync;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Full profile written
    Synced,
    /// Only the token-derived record was written
    FallbackSynced,
    /// Neither write went through; the account still works
    Failed,
}

/// Run the profile sync, falling back to the token-only sync.
///
/// Never returns an error: failures are logged and reported as [`SyncOutcome::Failed`].
pub async fn dual_sync(sync: &dyn ProfileSync, token: &str, profile: &ProfileFields) -> SyncOutcome {
    match sync.sync_profile(token, profile).await {
        Ok(user) => {
            info!(user_id = %user.id, "Profile synchronized with local user record");
            SyncOutcome::Synced
        }
        Err(primary) => {
            warn!(error = %primary, "Profile sync failed, falling back to token-only sync");
            match sync.sync_token(token).await {
                Ok(user) => {
                    info!(user_id = %user.id, "Token-only sync succeeded");
                    SyncOutcome::FallbackSynced
                }
                Err(fallback) => {
                    warn!(error = %fallback, "Token-only sync failed, continuing without local profile");
                    SyncOutcome::Failed
                }
            }
        }
    }
}
