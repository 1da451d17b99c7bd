// src/core/registry.rs

//! # Executable Registry
//!
//! `Executioner` is the entry point consuming types embed. It binds logical
//! executable names to resolved paths and policies at registration time, and
//! forwards calls either straight to the [`ProcessRunner`] or into the
//! per-instance [`CommandQueue`].
//!
//! ```no_run
//! use executioner::core::registry::{Executioner, RegisterOptions};
//! use executioner::models::ExecOptions;
//!
//! let mut exe = Executioner::new();
//! exe.register("sh", RegisterOptions::default());
//! let output = exe.invoke("sh", "-c 'echo hi'", &ExecOptions::default())?;
//! # Ok::<(), executioner::system::executor::ExecutionError>(())
//! ```

use crate::core::{paths, queue::CommandQueue, resolver};
use crate::models::{
    callable_name, EnvVars, ExecOptions, ExecutableBinding, ExecutableConfig, ExecutionerConfig,
    SearchPaths,
};
use crate::system::executor::{ExecutionError, ProcessRunner};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::path::{Path, PathBuf};

/// Predicate deciding whether an existing candidate path is acceptable.
pub type Selector = Box<dyn Fn(&Path) -> bool>;

/// Registration-time policy for one executable.
#[derive(Default)]
pub struct RegisterOptions {
    /// Explicit location. Skips resolution entirely.
    pub path: Option<PathBuf>,
    /// Options applied to every call unless overridden.
    pub defaults: ExecOptions,
    /// Queue calls instead of executing them.
    pub use_queue: bool,
    /// Filter applied to resolution candidates.
    pub select_if: Option<Selector>,
}

impl RegisterOptions {
    /// Sets the explicit location.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the default environment assignments.
    pub fn with_env(mut self, env: EnvVars) -> Self {
        self.defaults.env = Some(env);
        self
    }

    /// Sets the default stream switch.
    pub fn switched(mut self, switch: bool) -> Self {
        self.defaults.switch_stdout_and_stderr = Some(switch);
        self
    }

    /// Queues calls instead of executing them.
    pub fn queued(mut self, use_queue: bool) -> Self {
        self.use_queue = use_queue;
        self
    }

    /// Accepts only candidates for which `select` returns `true`.
    pub fn select_if(mut self, select: impl Fn(&Path) -> bool + 'static) -> Self {
        self.select_if = Some(Box::new(select));
        self
    }
}

impl fmt::Debug for RegisterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterOptions")
            .field("path", &self.path)
            .field("defaults", &self.defaults)
            .field("use_queue", &self.use_queue)
            .field("select_if", &self.select_if.is_some())
            .finish()
    }
}

impl From<&ExecutableConfig> for RegisterOptions {
    fn from(config: &ExecutableConfig) -> Self {
        let mut options = Self {
            path: config.path.clone(),
            defaults: config.exec_options(),
            use_queue: config.use_queue,
            select_if: None,
        };
        if let Some(rule) = config.select.clone() {
            options = options.select_if(move |candidate| rule.accepts(candidate));
        }
        options
    }
}

/// What a call to a binding did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// The command ran; this is its captured output.
    Executed(String),
    /// The command was appended to the queue.
    Queued,
}

impl Invocation {
    /// The captured output, `None` for queued calls.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Executed(output) => Some(output),
            Self::Queued => None,
        }
    }
}

/// Named bindings to external executables plus one pending command queue.
#[derive(Debug)]
pub struct Executioner {
    search_paths: SearchPaths,
    runner: ProcessRunner,
    // Keyed by callable name.
    bindings: BTreeMap<String, ExecutableBinding>,
    queue: CommandQueue,
}

impl Default for Executioner {
    fn default() -> Self {
        Self::new()
    }
}

impl Executioner {
    /// Default search paths, system shell.
    pub fn new() -> Self {
        Self::with_runner(paths::default_search_paths(), ProcessRunner::default())
    }

    /// Uses `search_paths` and runs commands through `runner`.
    pub fn with_runner(search_paths: SearchPaths, runner: ProcessRunner) -> Self {
        Self {
            search_paths,
            runner,
            bindings: BTreeMap::new(),
            queue: CommandQueue::new(),
        }
    }

    /// Builds an `Executioner` from a configuration file's contents: its
    /// search paths (or the defaults) and every `[executables.*]` entry.
    pub fn from_config(config: &ExecutionerConfig, runner: ProcessRunner) -> Self {
        let search_paths = match &config.search_paths {
            Some(templates) => paths::expand_search_paths(templates),
            None => paths::default_search_paths(),
        };
        let mut executioner = Self::with_runner(search_paths, runner);
        executioner.register_from_config(config);
        executioner
    }

    /// The directories used to resolve executables.
    pub fn search_paths(&self) -> &SearchPaths {
        &self.search_paths
    }

    /// Registers every executable declared in `config`.
    pub fn register_from_config(&mut self, config: &ExecutionerConfig) {
        for (name, entry) in &config.executables {
            self.register(name, RegisterOptions::from(entry));
        }
    }

    /// Binds `name` to a path and default options, replacing any earlier
    /// binding of the same name.
    ///
    /// An explicit `path` always wins. Otherwise the name is resolved against
    /// the search paths, honouring `select_if`. A failed resolution is not an
    /// error here; calling the binding later is.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        options: RegisterOptions,
    ) -> &ExecutableBinding {
        let name = name.into();
        let RegisterOptions {
            path,
            defaults,
            use_queue,
            select_if,
        } = options;

        let path = path.or_else(|| {
            resolver::find_executable(&name, &self.search_paths, None, select_if.as_deref())
        });
        match &path {
            Some(p) => log::debug!("Registered '{}' at '{}'.", name, p.display()),
            None => log::debug!("Registered '{}' without a resolved path.", name),
        }

        let key = callable_name(&name);
        let binding = ExecutableBinding {
            callable_name: key.clone(),
            name,
            path,
            defaults,
            use_queue,
        };
        match self.bindings.entry(key) {
            Entry::Occupied(mut entry) => {
                entry.insert(binding);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(binding),
        }
    }

    /// Looks a binding up by logical or callable name.
    pub fn binding(&self, name: &str) -> Option<&ExecutableBinding> {
        self.bindings.get(&callable_name(name))
    }

    /// Every binding, ordered by callable name.
    pub fn bindings(&self) -> impl Iterator<Item = &ExecutableBinding> {
        self.bindings.values()
    }

    /// Calls the binding registered under `name` with `args`.
    ///
    /// `overrides` take precedence over the registration defaults. Queued
    /// bindings only append `"<path> <args>"` to the queue.
    pub fn invoke(
        &mut self,
        name: &str,
        args: &str,
        overrides: &ExecOptions,
    ) -> Result<Invocation, ExecutionError> {
        let binding = self
            .binding(name)
            .ok_or_else(|| ExecutionError::UnknownExecutable(name.to_string()))?;

        let path = binding
            .path
            .as_ref()
            .ok_or_else(|| ExecutionError::ExecutableNotFound {
                name: binding.name.clone(),
                search_paths: self.search_paths.clone(),
            })?;

        let command = format!("{} {}", path.display(), args);
        if binding.use_queue {
            self.queue(command);
            return Ok(Invocation::Queued);
        }

        let options = binding.defaults.merged_with(overrides);
        self.execute(&command, &options).map(Invocation::Executed)
    }

    /// Runs `command` right away, bypassing the queue.
    pub fn execute(&self, command: &str, options: &ExecOptions) -> Result<String, ExecutionError> {
        self.runner.execute(command, options)
    }

    /// Appends `command` to the pending chain.
    pub fn queue(&mut self, command: impl Into<String>) {
        self.queue.queue(command);
    }

    /// The pending commands joined with ` && `.
    pub fn queued_commands(&self) -> String {
        self.queue.queued_commands()
    }

    /// Runs every queued command as one `&&` chain.
    ///
    /// The queue is emptied before the chain runs, so it is empty afterwards
    /// even when the chain fails. An empty queue returns `""` without
    /// spawning anything or calling the command logger.
    pub fn execute_queued(&mut self, options: &ExecOptions) -> Result<String, ExecutionError> {
        if self.queue.is_empty() {
            log::debug!("No queued commands to execute.");
            return Ok(String::new());
        }
        let chain = self.queue.take_joined();
        self.execute(&chain, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SelectRule;
    use crate::system::executor::testing::fake_runner;
    use crate::system::logger::testing::RecordingLogger;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    // --- Helper: a temp search path list with `sh` in the second directory ---
    struct Fixture {
        _root: TempDir,
        paths: SearchPaths,
    }

    impl Fixture {
        fn new() -> Self {
            let root = TempDir::new().unwrap();
            let dirs: Vec<PathBuf> = ["home_bin", "bin", "usr_bin"]
                .iter()
                .map(|d| {
                    let dir = root.path().join(d);
                    fs::create_dir(&dir).unwrap();
                    dir
                })
                .collect();
            let paths = SearchPaths::new(dirs);
            let fixture = Fixture { _root: root, paths };
            fixture.touch(1, "sh");
            fixture.touch(1, "executable-with-dash");
            fixture
        }

        fn dir(&self, index: usize) -> &Path {
            &self.paths.as_slice()[index]
        }

        fn touch(&self, index: usize, name: &str) -> PathBuf {
            let path = self.dir(index).join(name);
            fs::write(&path, "").unwrap();
            path
        }

        fn executioner(&self, stdout: &str) -> (Executioner, Arc<Mutex<Vec<String>>>) {
            let (runner, commands) = fake_runner(stdout, "");
            (Executioner::with_runner(self.paths.clone(), runner), commands)
        }
    }

    #[test]
    fn test_invoke_executes_resolved_path_with_args() {
        let fixture = Fixture::new();
        let (mut exe, commands) = fixture.executioner("out");
        exe.register("sh", RegisterOptions::default());

        let result = exe
            .invoke("sh", "with some args", &ExecOptions::default())
            .unwrap();

        assert_eq!(result, Invocation::Executed("out".to_string()));
        let expected = format!("{} with some args", fixture.dir(1).join("sh").display());
        assert_eq!(commands.lock().unwrap()[0], expected);
    }

    #[test]
    fn test_unresolved_binding_raises_not_found_at_call_time() {
        let fixture = Fixture::new();
        let (mut exe, commands) = fixture.executioner("");
        let binding = exe.register("doesnotexistforsure", RegisterOptions::default());
        assert!(binding.path.is_none());

        let err = exe
            .invoke("doesnotexistforsure", "right?", &ExecOptions::default())
            .unwrap_err();

        assert!(matches!(err, ExecutionError::ExecutableNotFound { .. }));
        let message = err.to_string();
        assert!(message.contains("'doesnotexistforsure'"));
        for dir in fixture.paths.iter() {
            assert!(message.contains(&dir.display().to_string()));
        }
        assert!(commands.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_name_is_reported() {
        let fixture = Fixture::new();
        let (mut exe, _) = fixture.executioner("");
        let err = exe.invoke("ghost", "", &ExecOptions::default()).unwrap_err();
        assert!(matches!(err, ExecutionError::UnknownExecutable(ref n) if n == "ghost"));
    }

    #[test]
    fn test_hyphenated_name_is_callable_with_underscores() {
        let fixture = Fixture::new();
        let (mut exe, _) = fixture.executioner("done");
        let binding = exe.register("executable-with-dash", RegisterOptions::default());
        assert_eq!(binding.callable_name, "executable_with_dash");
        assert!(binding.path.is_some());

        let by_underscore = exe
            .invoke("executable_with_dash", "", &ExecOptions::default())
            .unwrap();
        let by_hyphen = exe
            .invoke("executable-with-dash", "", &ExecOptions::default())
            .unwrap();
        assert_eq!(by_underscore, by_hyphen);
    }

    #[test]
    fn test_explicit_path_skips_resolution() {
        let fixture = Fixture::new();
        let (mut exe, commands) = fixture.executioner("");
        exe.register(
            "with_path",
            RegisterOptions::default().with_path("/path/to/executable"),
        );

        exe.invoke("with_path", "arg1", &ExecOptions::default()).unwrap();
        assert_eq!(commands.lock().unwrap()[0], "/path/to/executable arg1");
    }

    #[test]
    fn test_explicit_path_wins_over_selector() {
        let fixture = Fixture::new();
        let (mut exe, _) = fixture.executioner("");
        let binding = exe.register(
            "sh",
            RegisterOptions::default()
                .with_path("/custom/sh")
                .select_if(|_| false),
        );
        assert_eq!(binding.path, Some(PathBuf::from("/custom/sh")));
    }

    #[test]
    fn test_registration_env_is_prepended() {
        let fixture = Fixture::new();
        let (mut exe, commands) = fixture.executioner("");
        exe.register(
            "with_env",
            RegisterOptions::default()
                .with_path("/path/to/executable")
                .with_env([("foo", "bar")].into_iter().collect()),
        );

        exe.invoke("with_env", "arg1", &ExecOptions::default()).unwrap();
        assert_eq!(
            commands.lock().unwrap()[0],
            "foo='bar' /path/to/executable arg1"
        );
    }

    #[test]
    fn test_call_options_override_registration_defaults() {
        let fixture = Fixture::new();
        let (mut exe, commands) = fixture.executioner("");
        exe.register(
            "with_env",
            RegisterOptions::default()
                .with_path("/path/to/executable")
                .with_env([("foo", "bar")].into_iter().collect()),
        );

        let overrides = ExecOptions::default().with_env([("foo", "foo")].into_iter().collect());
        exe.invoke("with_env", "arg1", &overrides).unwrap();
        assert_eq!(
            commands.lock().unwrap()[0],
            "foo='foo' /path/to/executable arg1"
        );
    }

    #[test]
    fn test_switched_binding_returns_stderr() {
        let fixture = Fixture::new();
        let (runner, _) = fake_runner("", "progress on stderr");
        let mut exe = Executioner::with_runner(fixture.paths.clone(), runner);
        exe.register("sh", RegisterOptions::default().switched(true));

        let result = exe.invoke("sh", "x", &ExecOptions::default()).unwrap();
        assert_eq!(result.output(), Some("progress on stderr"));
    }

    #[test]
    fn test_queue_by_default() {
        let fixture = Fixture::new();
        let (mut exe, commands) = fixture.executioner("");
        exe.register("sh", RegisterOptions::default().queued(true));

        assert_eq!(
            exe.invoke("sh", "arg1", &ExecOptions::default()).unwrap(),
            Invocation::Queued
        );
        exe.invoke("sh", "arg2", &ExecOptions::default()).unwrap();
        assert!(commands.lock().unwrap().is_empty());

        let sh = fixture.dir(1).join("sh");
        let expected = format!("{} arg1 && {} arg2", sh.display(), sh.display());
        assert_eq!(exe.queued_commands(), expected);

        exe.execute_queued(&ExecOptions::default()).unwrap();
        assert_eq!(*commands.lock().unwrap(), vec![expected]);
        assert_eq!(exe.queued_commands(), "");
    }

    #[test]
    fn test_execute_queued_resets_even_on_failure() {
        let fixture = Fixture::new();
        let (runner, commands) = fake_runner("", "first failed");
        let mut exe = Executioner::with_runner(fixture.paths.clone(), runner);
        exe.queue("a");
        exe.queue("b");

        let err = exe.execute_queued(&ExecOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Command: \"a && b\""));
        assert_eq!(exe.queued_commands(), "");
        assert_eq!(commands.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_execute_queued_on_empty_queue_spawns_nothing() {
        let fixture = Fixture::new();
        let (mut exe, commands) = fixture.executioner("");
        assert_eq!(exe.execute_queued(&ExecOptions::default()).unwrap(), "");
        assert!(commands.lock().unwrap().is_empty());
    }

    #[test]
    fn test_execute_queued_on_empty_queue_logs_nothing() {
        let fixture = Fixture::new();
        let recorder = Arc::new(RecordingLogger::default());
        let (runner, commands) = fake_runner("", "");
        let mut exe =
            Executioner::with_runner(fixture.paths.clone(), runner.with_logger(recorder.clone()));

        assert_eq!(exe.execute_queued(&ExecOptions::default()).unwrap(), "");
        assert!(recorder.lines().is_empty());
        assert!(commands.lock().unwrap().is_empty());

        exe.queue("a");
        exe.execute_queued(&ExecOptions::default()).unwrap();
        assert_eq!(recorder.lines(), vec!["Executing: `a'".to_string()]);
    }

    #[test]
    fn test_select_if_picks_accepted_candidate() {
        let fixture = Fixture::new();
        for i in 0..3 {
            fixture.touch(i, "with_selection_proc");
        }
        let (mut exe, _) = fixture.executioner("");

        let binding = exe.register(
            "with_selection_proc",
            RegisterOptions::default().select_if(|_| false),
        );
        assert!(binding.path.is_none());

        let wanted = fixture.dir(2).join("with_selection_proc");
        let target = wanted.clone();
        let binding = exe.register(
            "with_selection_proc",
            RegisterOptions::default().select_if(move |p| p == target.as_path()),
        );
        assert_eq!(binding.path, Some(wanted));
    }

    #[test]
    fn test_reregistering_replaces_binding() {
        let fixture = Fixture::new();
        let (mut exe, _) = fixture.executioner("");
        exe.register("sh", RegisterOptions::default());
        exe.register("sh", RegisterOptions::default().queued(true));

        assert_eq!(exe.bindings().count(), 1);
        assert!(exe.binding("sh").unwrap().use_queue);
    }

    #[test]
    fn test_from_config_registers_entries() {
        let fixture = Fixture::new();
        let mut config = ExecutionerConfig {
            search_paths: Some(
                fixture
                    .paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
            ),
            ..Default::default()
        };
        config.executables.insert(
            "sh".to_string(),
            ExecutableConfig {
                use_queue: true,
                select: Some(SelectRule::PathPrefix(fixture.dir(1).to_path_buf())),
                ..Default::default()
            },
        );
        let (runner, _) = fake_runner("", "");

        let exe = Executioner::from_config(&config, runner);
        assert_eq!(exe.search_paths(), &fixture.paths);
        let binding = exe.binding("sh").unwrap();
        assert!(binding.use_queue);
        assert_eq!(binding.path, Some(fixture.dir(1).join("sh")));
    }
}
