//! `--create`, `--exec-into`, `--view-instances` and `--delete`.

use anyhow::Context as _;
use rescli_common::error::ResCliError;
use rescli_common::types::{InstanceId, InstanceKind};
use rescli_runtime::runner::RuntimeCli;

use crate::commands::context::Context;
use crate::output;

/// Creates an instance of `kind` named after the logged-in user.
///
/// # Errors
///
/// Returns an error if the session cannot be read or the runtime refuses.
pub fn create(ctx: &mut Context, kind: InstanceKind) -> anyhow::Result<u8> {
    output::info(&format!("Creating {kind} instance..."));

    let owner = ctx
        .session()
        .and_then(|session| session.display_name())
        .context("Error reading the current session")?;
    let instance = ctx
        .instances()
        .create(&owner, kind)
        .map_err(|e| with_runtime_hint(&ctx.config().runtime, e))
        .context("Error creating instance")?;

    let id = instance.id.as_str();
    if id.is_empty() {
        output::success(&format!(
            "{kind} instance created successfully with container name: {}",
            instance.container_name
        ));
    } else {
        output::success(&format!(
            "{kind} instance created successfully with container name: {} (ID {id})",
            instance.container_name
        ));
    }
    Ok(0)
}

/// Opens an interactive shell inside an instance.
///
/// The shell's exit status becomes the action's exit code.
///
/// # Errors
///
/// Returns an error if the runtime cannot be started.
pub fn exec_into(ctx: &mut Context, id: &InstanceId) -> anyhow::Result<u8> {
    let code = ctx
        .instances()
        .exec_into(id)
        .map_err(|e| with_runtime_hint(&ctx.config().runtime, e))
        .with_context(|| format!("Error executing command in instance {id}"))?;
    if code != 0 {
        tracing::info!(id = %id, code, "shell exited with non-zero status");
    }
    Ok(u8::try_from(code).unwrap_or(1))
}

/// Prints the runtime's table of running instances.
///
/// # Errors
///
/// Returns an error if the runtime cannot list containers.
pub fn view(ctx: &mut Context) -> anyhow::Result<u8> {
    let table = ctx
        .instances()
        .list()
        .map_err(|e| with_runtime_hint(&ctx.config().runtime, e))
        .context("Error listing instances")?;
    output::raw(&table);
    Ok(0)
}

/// Stops and removes an instance.
///
/// # Errors
///
/// Returns an error if stopping or removing fails.
pub fn delete(ctx: &mut Context, id: &InstanceId) -> anyhow::Result<u8> {
    output::info(&format!("Deleting instance {id}..."));
    ctx.instances()
        .delete(id)
        .map_err(|e| with_runtime_hint(&ctx.config().runtime, e))
        .with_context(|| format!("Error deleting instance {id}"))?;
    output::success("Instance deleted successfully.");
    Ok(0)
}

/// Adds a hint when the runtime could not be started because it is not
/// installed.
fn with_runtime_hint(runtime: &str, err: ResCliError) -> anyhow::Error {
    if matches!(err, ResCliError::Spawn { .. }) && !RuntimeCli::new(runtime).is_available() {
        anyhow::Error::new(err).context(format!(
            "`{runtime}` was not found on PATH; install it or choose another with --runtime"
        ))
    } else {
        err.into()
    }
}
