//! CLI flag definitions and dispatch.
//!
//! Every action flag triggers one action. When several are given they run
//! in command-line order, each independently: a failed action is reported
//! and the next one still runs.

pub mod account;
pub mod api;
pub mod context;
pub mod instances;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{ArgMatches, CommandFactory, Parser};
use rescli_common::config::ResCliConfig;
use rescli_common::constants;
use rescli_common::types::{InstanceId, InstanceKind, PasswordTransport};

use crate::commands::context::Context;
use crate::output;

/// ResCli: manage ResilientDB instances and your ResilientDB account.
#[derive(Parser, Debug)]
#[command(name = "res-cli", version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Create a new ResDB or PythonSDK instance.
    #[arg(
        short = 'c',
        long,
        value_name = "TYPE",
        value_parser = PossibleValuesParser::new(InstanceKind::NAMES)
            .try_map(|s| s.parse::<InstanceKind>()),
        help_heading = "Instances"
    )]
    pub create: Option<InstanceKind>,

    /// Bash into a running ResDB or PythonSDK instance.
    #[arg(short = 'e', long, value_name = "INSTANCE_ID", help_heading = "Instances")]
    pub exec_into: Option<String>,

    /// View details about running instances.
    #[arg(short = 'v', long, help_heading = "Instances")]
    pub view_instances: bool,

    /// Delete a running ResDB or PythonSDK instance.
    #[arg(short = 'd', long, value_name = "INSTANCE_ID", help_heading = "Instances")]
    pub delete: Option<String>,

    /// Test the API connection.
    #[arg(short = 't', long, help_heading = "Account")]
    pub test_api: bool,

    /// Login with username and password.
    #[arg(long, help_heading = "Account")]
    pub login: bool,

    /// Sign up with email and password.
    #[arg(long, help_heading = "Account")]
    pub sign_up: bool,

    /// Display the current logged-in user.
    #[arg(long, help_heading = "Account")]
    pub whoami: bool,

    /// Logout.
    #[arg(long, help_heading = "Account")]
    pub logout: bool,

    /// Path to the config file holding the session.
    #[arg(long, env = "RESCLI_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the authentication service.
    #[arg(long, env = "RESCLI_API_URL", default_value = constants::DEFAULT_API_URL)]
    pub api_url: String,

    /// Container runtime binary.
    #[arg(long, env = "RESCLI_RUNTIME", default_value = constants::DEFAULT_RUNTIME)]
    pub runtime: String,

    /// Image repository instances are created from.
    #[arg(long, env = "RESCLI_IMAGE_REPO", default_value = constants::DEFAULT_IMAGE_REPO)]
    pub image_repo: String,

    /// Image tag instances are created from.
    #[arg(long, env = "RESCLI_IMAGE_TAG", default_value = constants::DEFAULT_IMAGE_TAG)]
    pub image_tag: String,

    /// How passwords are encoded before they are sent.
    ///
    /// Applies to both login and sign-up; the service must expect the same
    /// encoding the account was registered with.
    #[arg(
        long,
        env = "RESCLI_PASSWORD_TRANSPORT",
        default_value = "sha256",
        value_parser = PossibleValuesParser::new(PasswordTransport::NAMES)
            .try_map(|s| s.parse::<PasswordTransport>())
    )]
    pub password_transport: PasswordTransport,
}

/// A single action requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `--create`.
    Create(InstanceKind),
    /// `--exec-into`.
    ExecInto(InstanceId),
    /// `--view-instances`.
    ViewInstances,
    /// `--delete`.
    Delete(InstanceId),
    /// `--test-api`.
    TestApi,
    /// `--login`.
    Login,
    /// `--sign-up`.
    SignUp,
    /// `--whoami`.
    Whoami,
    /// `--logout`.
    Logout,
}

impl Cli {
    /// Collects the requested actions in the order they were given.
    #[must_use]
    pub fn actions(&self, matches: &ArgMatches) -> Vec<Action> {
        let mut requested: Vec<(&str, Action)> = Vec::new();
        if let Some(kind) = self.create {
            requested.push(("create", Action::Create(kind)));
        }
        if let Some(id) = &self.exec_into {
            requested.push(("exec_into", Action::ExecInto(InstanceId::new(id.as_str()))));
        }
        if self.view_instances {
            requested.push(("view_instances", Action::ViewInstances));
        }
        if let Some(id) = &self.delete {
            requested.push(("delete", Action::Delete(InstanceId::new(id.as_str()))));
        }
        if self.test_api {
            requested.push(("test_api", Action::TestApi));
        }
        if self.login {
            requested.push(("login", Action::Login));
        }
        if self.sign_up {
            requested.push(("sign_up", Action::SignUp));
        }
        if self.whoami {
            requested.push(("whoami", Action::Whoami));
        }
        if self.logout {
            requested.push(("logout", Action::Logout));
        }

        requested.sort_by_key(|(id, _)| matches.index_of(id).unwrap_or(usize::MAX));
        requested.into_iter().map(|(_, action)| action).collect()
    }

    /// Builds the runtime configuration from the settings flags.
    #[must_use]
    pub fn config(&self) -> ResCliConfig {
        let defaults = ResCliConfig::default();
        ResCliConfig {
            config_file: self.config.clone().unwrap_or(defaults.config_file),
            api_url: self.api_url.clone(),
            runtime: self.runtime.clone(),
            image_repo: self.image_repo.clone(),
            image_tag: self.image_tag.clone(),
            password_transport: self.password_transport,
        }
    }
}

/// Runs every requested action and returns the process exit code.
///
/// The code is 0 when all actions succeed. Otherwise it is the code of the
/// first failed action: 1 for errors, or the shell's own status for
/// `--exec-into`. Without any action the usage is printed and the code is 2.
pub fn execute(cli: &Cli, matches: &ArgMatches) -> ExitCode {
    let actions = cli.actions(matches);
    if actions.is_empty() {
        output::usage(&Cli::command().render_help().to_string());
        return ExitCode::from(2);
    }

    let mut ctx = Context::new(cli.config());
    tracing::debug!(config = ?ctx.config(), "configuration resolved");
    let mut exit_code = 0u8;

    for action in actions {
        tracing::debug!(?action, "dispatching action");
        let code = match dispatch(&mut ctx, &action) {
            Ok(code) => code,
            Err(e) => {
                output::error(&e);
                1
            }
        };
        if exit_code == 0 {
            exit_code = code;
        }
    }

    ExitCode::from(exit_code)
}

/// Routes one action to its handler, returning its exit code.
fn dispatch(ctx: &mut Context, action: &Action) -> anyhow::Result<u8> {
    match action {
        Action::Create(kind) => instances::create(ctx, *kind),
        Action::ExecInto(id) => instances::exec_into(ctx, id),
        Action::ViewInstances => instances::view(ctx),
        Action::Delete(id) => instances::delete(ctx, id),
        Action::TestApi => api::test(ctx),
        Action::Login => account::login(ctx),
        Action::SignUp => account::sign_up(ctx),
        Action::Whoami => account::whoami(ctx),
        Action::Logout => account::logout(ctx),
    }
}
