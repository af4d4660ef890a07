//! One-time confirmation tokens.

use rand::{rngs::OsRng, RngCore};

use common::{AppError, AppResult};
use domain::{CHANGE_EMAIL_TOKEN_BYTES, MSG_GENERATE_TOKEN};

/// Random hex token drawn from the OS RNG.
pub fn generate_token() -> AppResult<String> {
    let mut bytes = [0u8; CHANGE_EMAIL_TOKEN_BYTES];
    OsRng.try_fill_bytes(&mut bytes).map_err(|e| {
        tracing::error!(error = %e, "Failed to generate verification token");
        AppError::internal(MSG_GENERATE_TOKEN)
    })?;
    Ok(hex::encode(bytes))
}
