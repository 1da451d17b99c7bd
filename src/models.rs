// src/models.rs

//! Data types shared by the resolver, the runner, the registry and the
//! configuration file.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

// --- SEARCH PATHS ---

/// An ordered list of directories searched for executables.
/// Earlier entries take priority. The list never changes once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPaths(Vec<PathBuf>);

impl SearchPaths {
    /// Builds the list in the given order.
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self(dirs.into_iter().map(Into::into).collect())
    }

    /// The directories, highest priority first.
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.0
    }

    /// Iterates the directories in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.0.iter()
    }

    /// Number of directories.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list has no directories.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Position of `dir` in the list, if present.
    pub fn position(&self, dir: &Path) -> Option<usize> {
        self.0.iter().position(|p| p == dir)
    }
}

impl fmt::Display for SearchPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

// --- ENVIRONMENT ---

/// Environment assignments prepended to a command, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars(Vec<(String, String)>);

impl EnvVars {
    /// An empty set of assignments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`. An existing key keeps its position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Iterates `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether no variable is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses a `KEY=VALUE` assignment as accepted on the command line.
    pub fn parse_assignment(raw: &str) -> Option<(String, String)> {
        let (key, value) = raw.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), value.to_string()))
    }

    /// Renders the assignments as a shell prefix: `K1='v1' K2='v2'`.
    pub fn to_shell_prefix(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}='{}'", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvVars {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut env = Self::new();
        for (k, v) in iter {
            env.set(k, v);
        }
        env
    }
}

impl<'de> Deserialize<'de> for EnvVars {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EnvVarsVisitor;

        impl<'de> Visitor<'de> for EnvVarsVisitor {
            type Value = EnvVars;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of environment variables")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<EnvVars, A::Error> {
                let mut env = EnvVars::new();
                while let Some((key, value)) = map.next_entry::<String, EnvValue>()? {
                    env.set(key, value.0);
                }
                Ok(env)
            }
        }

        deserializer.deserialize_map(EnvVarsVisitor)
    }
}

/// Accepts strings, numbers and booleans as environment values.
struct EnvValue(String);

impl<'de> Deserialize<'de> for EnvValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EnvValueVisitor;

        impl<'de> Visitor<'de> for EnvValueVisitor {
            type Value = EnvValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<EnvValue, E> {
                Ok(EnvValue(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<EnvValue, E> {
                Ok(EnvValue(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<EnvValue, E> {
                Ok(EnvValue(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<EnvValue, E> {
                Ok(EnvValue(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<EnvValue, E> {
                Ok(EnvValue(v.to_string()))
            }
        }

        deserializer.deserialize_any(EnvValueVisitor)
    }
}

// --- INVOCATION POLICY ---

/// Per-invocation options. Unset fields fall back to the registration defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExecOptions {
    /// Variables prepended to the command as `K='v'` assignments.
    pub env: Option<EnvVars>,
    /// Treat stderr as the primary stream.
    pub switch_stdout_and_stderr: Option<bool>,
}

impl ExecOptions {
    /// Sets the environment assignments.
    pub fn with_env(mut self, env: EnvVars) -> Self {
        self.env = Some(env);
        self
    }

    /// Sets the stream switch.
    pub fn switched(mut self, switch: bool) -> Self {
        self.switch_stdout_and_stderr = Some(switch);
        self
    }

    /// Whether stderr is the primary stream.
    pub fn streams_switched(&self) -> bool {
        self.switch_stdout_and_stderr.unwrap_or(false)
    }

    /// Layers `overrides` on top of `self`. Each key set in `overrides`
    /// replaces the default value as a whole.
    pub fn merged_with(&self, overrides: &Self) -> Self {
        Self {
            env: overrides.env.clone().or_else(|| self.env.clone()),
            switch_stdout_and_stderr: overrides
                .switch_stdout_and_stderr
                .or(self.switch_stdout_and_stderr),
        }
    }
}

/// A logical executable name bound to its resolved path and default policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableBinding {
    /// The name the executable was registered under (e.g. `aclocal-1.10`).
    pub name: String,
    /// The name used to call the binding (`aclocal_1.10`).
    pub callable_name: String,
    /// `None` when resolution failed.
    pub path: Option<PathBuf>,
    /// Options applied to every call unless overridden.
    pub defaults: ExecOptions,
    /// Calls are queued instead of executed.
    pub use_queue: bool,
}

/// Converts a logical name into its callable form.
pub fn callable_name(name: &str) -> String {
    name.replace('-', "_")
}

// --- CONFIGURATION FILE ---

/// Candidate filters that can be expressed in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectRule {
    /// Rejects candidates that are symbolic links.
    NotSymlink,
    /// Accepts only candidates whose path starts with the prefix.
    PathPrefix(PathBuf),
}

impl SelectRule {
    /// Whether `candidate` passes the rule.
    pub fn accepts(&self, candidate: &Path) -> bool {
        match self {
            Self::NotSymlink => !candidate.is_symlink(),
            Self::PathPrefix(prefix) => candidate.starts_with(prefix),
        }
    }
}

/// One `[executables.<name>]` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExecutableConfig {
    /// Explicit location; skips search path resolution.
    pub path: Option<PathBuf>,
    /// Default environment assignments.
    pub env: Option<EnvVars>,
    /// Default stream switch.
    pub switch_stdout_and_stderr: Option<bool>,
    /// Queue calls instead of executing them.
    pub use_queue: bool,
    /// Filter applied to resolution candidates.
    pub select: Option<SelectRule>,
}

impl ExecutableConfig {
    /// The entry's default execution options.
    pub fn exec_options(&self) -> ExecOptions {
        ExecOptions {
            env: self.env.clone(),
            switch_stdout_and_stderr: self.switch_stdout_and_stderr,
        }
    }
}

/// The contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExecutionerConfig {
    /// Replaces the default search paths when set. Entries may use `~` and `$VAR`.
    pub search_paths: Option<Vec<String>>,
    /// Executables to register, keyed by logical name.
    pub executables: BTreeMap<String, ExecutableConfig>,
}
