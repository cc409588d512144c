//! Instance lifecycle operations on top of a [`ProcessRunner`].
//!
//! No record of instances is kept locally: every listing re-queries the
//! runtime, and instances are addressed by the ID the runtime assigned.

use rescli_common::constants::LIST_FORMAT;
use rescli_common::error::Result;
use rescli_common::types::{InstanceId, InstanceKind};

use crate::runner::ProcessRunner;

/// A freshly created instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    /// ID assigned by the runtime.
    pub id: InstanceId,
    /// What the instance runs.
    pub kind: InstanceKind,
    /// Display name of the user who created it (empty when logged out).
    pub owner: String,
    /// Container name passed to the runtime.
    pub container_name: String,
}

/// Derives the container name for an instance of `kind` owned by `owner`.
#[must_use]
pub fn container_name(owner: &str, kind: InstanceKind) -> String {
    format!("{owner}-{kind}_instance")
}

/// Creates, lists, deletes and attaches to instances.
#[derive(Debug)]
pub struct InstanceManager<R> {
    runner: R,
    image_repo: String,
    image_tag: String,
}

impl<R: ProcessRunner> InstanceManager<R> {
    /// Creates a manager pulling images from `image_repo` with `image_tag`.
    pub fn new(runner: R, image_repo: impl Into<String>, image_tag: impl Into<String>) -> Self {
        Self {
            runner,
            image_repo: image_repo.into(),
            image_tag: image_tag.into(),
        }
    }

    /// Returns the underlying runner.
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Returns the image reference used for `kind`.
    #[must_use]
    pub fn image_for(&self, kind: InstanceKind) -> String {
        format!("{}/{kind}:{}", self.image_repo, self.image_tag)
    }

    /// Starts a detached instance of `kind` named after `owner`.
    ///
    /// # Errors
    ///
    /// Returns `ResCliError::Runtime` with the runtime's output if it
    /// refuses, including when the name is already taken.
    pub fn create(&self, owner: &str, kind: InstanceKind) -> Result<Instance> {
        if owner.is_empty() {
            tracing::warn!(%kind, "creating instance without a logged-in user");
        }
        let container_name = container_name(owner, kind);
        let args = vec![
            "run".to_string(),
            "--name".to_string(),
            container_name.clone(),
            "-d".to_string(),
            self.image_for(kind),
        ];
        let output = self.runner.run_checked(&args)?;
        let id = InstanceId::new(output.trim());
        tracing::info!(id = %id, name = %container_name, "instance created");

        Ok(Instance {
            id,
            kind,
            owner: owner.to_string(),
            container_name,
        })
    }

    /// Returns the runtime's table of running instances, verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot list containers.
    pub fn list(&self) -> Result<String> {
        let args = vec![
            "container".to_string(),
            "ls".to_string(),
            "--format".to_string(),
            LIST_FORMAT.to_string(),
        ];
        self.runner.run_checked(&args)
    }

    /// Stops and removes an instance.
    ///
    /// Removal is only attempted once the stop succeeded, so a failed stop
    /// leaves the instance in place.
    ///
    /// # Errors
    ///
    /// Returns the error of whichever step failed first.
    pub fn delete(&self, id: &InstanceId) -> Result<()> {
        tracing::info!(id = %id, "stopping instance");
        let _ = self
            .runner
            .run_checked(&["stop".to_string(), id.to_string()])?;

        tracing::info!(id = %id, "removing instance");
        let _ = self.runner.run_checked(&["rm".to_string(), id.to_string()])?;
        Ok(())
    }

    /// Opens an interactive shell inside an instance.
    ///
    /// Returns the shell's exit status.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be started.
    pub fn exec_into(&self, id: &InstanceId) -> Result<i32> {
        let args = vec![
            "exec".to_string(),
            "-it".to_string(),
            id.to_string(),
            "bash".to_string(),
        ];
        self.runner.run_interactive(&args)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use rescli_common::error::ResCliError;

    use super::*;
    use crate::runner::CapturedOutput;

    /// Records every invocation and replays scripted results.
    #[derive(Default)]
    struct FakeRunner {
        calls: RefCell<Vec<Vec<String>>>,
        replies: RefCell<VecDeque<CapturedOutput>>,
    }

    impl FakeRunner {
        fn replying(replies: &[(&str, i32)]) -> Self {
            Self {
                calls: RefCell::default(),
                replies: RefCell::new(
                    replies
                        .iter()
                        .map(|(output, exit_code)| CapturedOutput {
                            output: (*output).to_string(),
                            exit_code: *exit_code,
                        })
                        .collect(),
                ),
            }
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.borrow().clone()
        }

        fn next_reply(&self) -> CapturedOutput {
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or(CapturedOutput {
                    output: String::new(),
                    exit_code: 0,
                })
        }
    }

    impl ProcessRunner for FakeRunner {
        fn program(&self) -> &str {
            "docker"
        }

        fn run_capturing(&self, args: &[String]) -> Result<CapturedOutput> {
            self.calls.borrow_mut().push(args.to_vec());
            Ok(self.next_reply())
        }

        fn run_interactive(&self, args: &[String]) -> Result<i32> {
            self.calls.borrow_mut().push(args.to_vec());
            Ok(self.next_reply().exit_code)
        }
    }

    fn manager(runner: FakeRunner) -> InstanceManager<FakeRunner> {
        InstanceManager::new(runner, "expolab", "arm64")
    }

    #[test]
    fn container_name_combines_owner_and_kind() {
        assert_eq!(container_name("alice", InstanceKind::Resdb), "alice-resdb_instance");
        assert_eq!(container_name("bob", InstanceKind::Sdk), "bob-sdk_instance");
        assert_eq!(container_name("", InstanceKind::Sdk), "-sdk_instance");
    }

    #[test]
    fn create_runs_detached_named_container() {
        let mgr = manager(FakeRunner::replying(&[("f00dcafe\n", 0)]));
        let instance = mgr.create("alice", InstanceKind::Resdb).expect("create failed");

        assert_eq!(
            mgr.runner().calls(),
            vec![vec!["run", "--name", "alice-resdb_instance", "-d", "expolab/resdb:arm64"]]
        );
        assert_eq!(
            instance,
            Instance {
                id: InstanceId::new("f00dcafe"),
                kind: InstanceKind::Resdb,
                owner: "alice".into(),
                container_name: "alice-resdb_instance".into(),
            }
        );
    }

    #[test]
    fn create_uses_configured_image_source() {
        let mgr = InstanceManager::new(FakeRunner::default(), "mirror.local/expolab", "amd64");
        let _ = mgr.create("bob", InstanceKind::Sdk).expect("create failed");
        assert_eq!(mgr.runner().calls()[0][4], "mirror.local/expolab/sdk:amd64");
    }

    #[test]
    fn create_name_collision_surfaces_runtime_output() {
        let conflict = "Conflict. The container name \"/alice-resdb_instance\" is already in use";
        let mgr = manager(FakeRunner::replying(&[(conflict, 125)]));
        let err = mgr.create("alice", InstanceKind::Resdb).unwrap_err();
        assert_eq!(err.exit_code(), Some(125));
        assert!(err.to_string().contains("already in use"));
    }

    #[test]
    fn list_queries_runtime_with_table_format() {
        let table = "CONTAINER ID   IMAGE                 NAMES\nf00dcafe       expolab/resdb:arm64   alice-resdb_instance\n";
        let mgr = manager(FakeRunner::replying(&[(table, 0)]));
        let output = mgr.list().expect("list failed");

        assert_eq!(output, table);
        assert_eq!(
            mgr.runner().calls(),
            vec![vec!["container", "ls", "--format", "table {{.ID}}\t{{.Image}}\t{{.Names}}"]]
        );
    }

    #[test]
    fn delete_stops_then_removes() {
        let mgr = manager(FakeRunner::replying(&[("abc123\n", 0), ("abc123\n", 0)]));
        mgr.delete(&InstanceId::new("abc123")).expect("delete failed");
        assert_eq!(
            mgr.runner().calls(),
            vec![vec!["stop", "abc123"], vec!["rm", "abc123"]]
        );
    }

    #[test]
    fn delete_does_not_remove_when_stop_fails() {
        let mgr = manager(FakeRunner::replying(&[(
            "Error response from daemon: No such container: abc123",
            1,
        )]));
        let err = mgr.delete(&InstanceId::new("abc123")).unwrap_err();

        assert_eq!(mgr.runner().calls(), vec![vec!["stop", "abc123"]]);
        match err {
            ResCliError::Runtime { command, output, .. } => {
                assert_eq!(command, "docker stop abc123");
                assert!(output.contains("No such container"));
            }
            other => panic!("expected runtime error, got {other:?}"),
        }
    }

    #[test]
    fn delete_reports_remove_failure() {
        let mgr = manager(FakeRunner::replying(&[("abc123\n", 0), ("busy", 1)]));
        let err = mgr.delete(&InstanceId::new("abc123")).unwrap_err();
        assert!(err.to_string().contains("docker rm abc123"));
        assert_eq!(mgr.runner().calls().len(), 2);
    }

    #[test]
    fn exec_into_attaches_bash_and_returns_exit_code() {
        let mgr = manager(FakeRunner::replying(&[("", 130)]));
        let code = mgr.exec_into(&InstanceId::new("abc123")).expect("exec failed");
        assert_eq!(code, 130);
        assert_eq!(mgr.runner().calls(), vec![vec!["exec", "-it", "abc123", "bash"]]);
    }
}
