use rand::{rngs::OsRng, RngCore};
use sqlx::PgConnection;

use crate::services::provisioning::ProvisioningError;

/// Length of a residency access code in characters.
pub const CODE_LENGTH: usize = 6;

/// Retry cap for collision handling. With a 24-bit code space this is
/// effectively unreachable, but exhaustion must be a defined failure
/// rather than a silent loop.
const MAX_ATTEMPTS: u32 = 20;

/// Generate a residency access code that is unique across all residencies.
///
/// Runs on the caller's transaction connection: the existence check and the
/// eventual residency insert happen in the same transaction, and the unique
/// constraint on `residencies.access_code` backstops any remaining race.
pub async fn generate(conn: &mut PgConnection) -> Result<String, ProvisioningError> {
    for _ in 0..MAX_ATTEMPTS {
        let code = random_code();

        let taken: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM residencies WHERE access_code = $1")
                .bind(&code)
                .fetch_optional(&mut *conn)
                .await?;

        if taken.is_none() {
            return Ok(code);
        }
    }

    Err(ProvisioningError::CodeSpaceExhausted(MAX_ATTEMPTS))
}

/// Upper-cased hex from a CSPRNG, e.g. "A3F01B".
fn random_code() -> String {
    let mut bytes = [0u8; CODE_LENGTH / 2];
    OsRng.fill_bytes(&mut bytes);
    hex::encode_upper(bytes)
}
