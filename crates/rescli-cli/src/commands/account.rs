//! `--login`, `--sign-up`, `--whoami` and `--logout`.

use anyhow::{Context as _, bail};
use rescli_auth::outcome::AuthOutcome;

use crate::commands::context::Context;
use crate::output;

/// Prompts for credentials and logs in.
///
/// # Errors
///
/// Returns an error if the credentials cannot be read or the session cannot
/// be saved. A rejected login is reported and yields exit code 1.
pub fn login(ctx: &mut Context) -> anyhow::Result<u8> {
    let username = read_required("Enter your username: ", "username")?;
    let password = read_password()?;
    let outcome = ctx.auth_client()?.login(&username, &password);
    finish(ctx, outcome)
}

/// Prompts for an email and password and registers a new account.
///
/// # Errors
///
/// Returns an error if the credentials cannot be read or the session cannot
/// be saved. A rejected sign-up is reported and yields exit code 1.
pub fn sign_up(ctx: &mut Context) -> anyhow::Result<u8> {
    let email = read_required("Enter your email: ", "email")?;
    let password = read_password()?;
    let outcome = ctx.auth_client()?.sign_up(&email, &password);
    finish(ctx, outcome)
}

/// Prints the display name of the logged-in user.
///
/// # Errors
///
/// Returns an error if the config file cannot be read.
pub fn whoami(ctx: &mut Context) -> anyhow::Result<u8> {
    let name = ctx
        .session()
        .and_then(|session| session.display_name())
        .context("Error reading the current session")?;
    output::info(&output::format_whoami(&name));
    Ok(0)
}

/// Forgets the logged-in user.
///
/// # Errors
///
/// Returns an error if the config file cannot be written.
pub fn logout(ctx: &mut Context) -> anyhow::Result<u8> {
    ctx.session()
        .and_then(|session| session.clear_identity())
        .context("Error clearing the current session")?;
    output::success("Logout successful. Goodbye!");
    Ok(0)
}

/// Stores the identity on success and reports the outcome.
fn finish(ctx: &mut Context, outcome: AuthOutcome) -> anyhow::Result<u8> {
    match outcome {
        AuthOutcome::Success { identity, message } => {
            ctx.session()
                .and_then(|session| session.set_identity(&identity))
                .context("Error saving the session")?;
            output::success(&message);
            Ok(0)
        }
        AuthOutcome::Failure { reason, message } => {
            tracing::debug!(%reason, "authentication failed");
            output::failure(&message);
            Ok(1)
        }
    }
}

fn read_required(label: &str, what: &str) -> anyhow::Result<String> {
    let value = output::prompt(label).with_context(|| format!("Failed to read {what}"))?;
    if value.is_empty() {
        bail!("No {what} entered");
    }
    Ok(value)
}

fn read_password() -> anyhow::Result<String> {
    rpassword::prompt_password("Enter your password: ").context("Failed to read password")
}
