//! `--test-api`: check that the authentication service is reachable.

use anyhow::Context as _;

use crate::commands::context::Context;
use crate::output;

/// Calls the service's liveness endpoint and prints its answer.
///
/// # Errors
///
/// Returns an error if the service is unreachable or answers with a
/// status other than 200.
pub fn test(ctx: &mut Context) -> anyhow::Result<u8> {
    output::info("Testing API...");
    let body = ctx
        .auth_client()?
        .health_check()
        .context("API test failed")?;
    output::info(&body);
    Ok(0)
}
