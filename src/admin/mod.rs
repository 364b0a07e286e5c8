//! Administrative startup tasks for Agora.
//!
//! The only concern handled here is bootstrapping the initial admin account
//! from configuration. Runtime administration (account approval, the member
//! directory) happens through the web API.

use tracing::{debug, error, info};

use crate::auth::{register_admin, RegistrationError, RegistrationRequest};
use crate::config::BootstrapConfig;
use crate::db::{AccountRepository, DbPool};
use crate::{AgoraError, Result};

/// Create the initial admin account when configured and not yet present.
///
/// Does nothing when the bootstrap section is incomplete or when any admin
/// account already exists. A username or email collision with an existing
/// account is a configuration problem and aborts startup, as does bootstrap
/// data that fails registration validation.
pub async fn ensure_initial_admin(pool: &DbPool, bootstrap: &BootstrapConfig) -> Result<()> {
    if !bootstrap.is_complete() {
        debug!("Bootstrap section incomplete, skipping initial admin creation");
        return Ok(());
    }

    let repo = AccountRepository::new(pool);
    if repo.admin_exists().await? {
        debug!("Admin account already exists, skipping bootstrap");
        return Ok(());
    }

    let request = RegistrationRequest::new(
        &bootstrap.admin_username,
        &bootstrap.admin_nickname,
        &bootstrap.admin_password,
        &bootstrap.admin_email,
    );

    match register_admin(&repo, request).await {
        Ok(account) => {
            info!(
                username = %account.username,
                user_id = account.id,
                "Initial admin account created"
            );
            Ok(())
        }
        Err(RegistrationError::DuplicateIdentity) => {
            error!(
                username = %bootstrap.admin_username,
                "Bootstrap admin username or email is taken by an existing account"
            );
            Err(AgoraError::Config(
                "bootstrap admin conflicts with an existing account".to_string(),
            ))
        }
        Err(e) => {
            error!("Failed to create initial admin account: {e}");
            Err(AgoraError::Config(format!(
                "bootstrap admin creation failed: {e}"
            )))
        }
    }
}
