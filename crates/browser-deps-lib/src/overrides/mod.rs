//! Override table
//!
//! Parsed once from the root manifest's `browser-overrides` mapping and
//! consulted for every module during a resolution run. Each rule can swap a
//! module's entry point or stylesheet, pin its dependency list, or drop it
//! entirely, and any of those (except `deps`) can be refined per
//! environment.
//!
//! Accepted notations, per module id:
//!
//! ```json
//! {
//!   "short": "short/other-entry.js",
//!   "gone": false,
//!   "verbose": {
//!     "main": "verbose/dist/browser.js",
//!     "style": "verbose/dist/verbose.css",
//!     "deps": ["short"],
//!     "env": { "prod": "verbose/dist/browser.min.js", "test": false }
//!   }
//! }
//! ```

use crate::manifest::Manifest;
use crate::primitives::{OutputKind, ResolveError};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// An entry point override: either a replacement path or an explicit `false`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOverride {
    Path(String),
    Disabled,
}

/// The overridable fields, at module level or for one environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideFields {
    pub exclude: Option<bool>,
    pub main: Option<EntryOverride>,
    pub style: Option<EntryOverride>,
}

/// Everything the root package says about one module id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideRule {
    pub fields: OverrideFields,
    pub deps: Vec<String>,
    pub env: HashMap<String, OverrideFields>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRule {
    Flag(bool),
    Main(String),
    Verbose(RawVerbose),
}

#[derive(Deserialize)]
struct RawVerbose {
    #[serde(default)]
    exclude: Option<bool>,
    #[serde(default)]
    main: Option<RawEntry>,
    #[serde(default)]
    style: Option<RawEntry>,
    #[serde(default)]
    deps: Vec<String>,
    #[serde(default)]
    env: HashMap<String, RawEnv>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Flag(bool),
    Path(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEnv {
    Flag(bool),
    Main(String),
    Partial(RawPartial),
}

#[derive(Deserialize)]
struct RawPartial {
    #[serde(default)]
    exclude: Option<bool>,
    #[serde(default)]
    main: Option<RawEntry>,
    #[serde(default)]
    style: Option<RawEntry>,
}

impl RawEntry {
    // `true` carries no information and falls through to default resolution
    fn into_entry(self) -> Option<EntryOverride> {
        match self {
            RawEntry::Flag(false) => Some(EntryOverride::Disabled),
            RawEntry::Flag(true) => None,
            RawEntry::Path(path) => Some(EntryOverride::Path(path)),
        }
    }
}

impl RawEnv {
    fn into_fields(self) -> OverrideFields {
        match self {
            RawEnv::Flag(flag) => OverrideFields {
                main: RawEntry::Flag(flag).into_entry(),
                ..Default::default()
            },
            RawEnv::Main(path) => OverrideFields {
                main: Some(EntryOverride::Path(path)),
                ..Default::default()
            },
            RawEnv::Partial(partial) => OverrideFields {
                exclude: partial.exclude,
                main: partial.main.and_then(RawEntry::into_entry),
                style: partial.style.and_then(RawEntry::into_entry),
            },
        }
    }
}

impl OverrideRule {
    /// Parse one `browser-overrides` value
    pub fn parse(id: &str, value: &Value) -> Result<Self, ResolveError> {
        let raw: RawRule =
            serde_json::from_value(value.clone()).map_err(|e| ResolveError::InvalidOverride {
                id: id.to_string(),
                reason: e.to_string(),
            })?;

        let rule = match raw {
            RawRule::Flag(flag) => Self {
                fields: OverrideFields {
                    main: RawEntry::Flag(flag).into_entry(),
                    ..Default::default()
                },
                ..Default::default()
            },
            RawRule::Main(path) => Self {
                fields: OverrideFields {
                    main: Some(EntryOverride::Path(path)),
                    ..Default::default()
                },
                ..Default::default()
            },
            RawRule::Verbose(verbose) => Self {
                fields: OverrideFields {
                    exclude: verbose.exclude,
                    main: verbose.main.and_then(RawEntry::into_entry),
                    style: verbose.style.and_then(RawEntry::into_entry),
                },
                deps: verbose.deps,
                env: verbose
                    .env
                    .into_iter()
                    .map(|(name, raw)| (name, raw.into_fields()))
                    .collect(),
            },
        };

        Ok(rule)
    }
}

/// Override rules bound to the environment of one resolution run
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    rules: HashMap<String, OverrideRule>,
    environment: Option<String>,
}

impl OverrideTable {
    /// Create an empty table for the given environment
    pub fn new(environment: Option<String>) -> Self {
        Self {
            rules: HashMap::new(),
            environment,
        }
    }

    /// Parse the root manifest's `browser-overrides`
    pub fn from_manifest(
        manifest: &Manifest,
        environment: Option<&str>,
    ) -> Result<Self, ResolveError> {
        let mut table = Self::new(environment.map(str::to_string));

        if let Some(overrides) = manifest.overrides() {
            for (id, value) in overrides {
                table.insert(id.clone(), OverrideRule::parse(id, value)?);
            }
        }

        debug!(
            rules = table.rules.len(),
            environment = ?table.environment,
            "Loaded browser overrides"
        );
        Ok(table)
    }

    /// Add or replace the rule for a module id
    pub fn insert(&mut self, id: impl Into<String>, rule: OverrideRule) {
        self.rules.insert(id.into(), rule);
    }

    pub fn rule(&self, id: &str) -> Option<&OverrideRule> {
        self.rules.get(id)
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Environment value first, then the module-level value
    fn lookup<'a, T>(
        &'a self,
        id: &str,
        pick: impl Fn(&'a OverrideFields) -> Option<&'a T>,
    ) -> Option<&'a T> {
        let rule = self.rules.get(id)?;

        if let Some(env_fields) = self
            .environment
            .as_deref()
            .and_then(|env| rule.env.get(env))
        {
            if let Some(value) = pick(env_fields) {
                return Some(value);
            }
        }

        pick(&rule.fields)
    }

    /// Whether the module is dropped from the run altogether
    pub fn is_excluded(&self, id: &str) -> bool {
        let excluded = self.lookup(id, |f| f.exclude.as_ref()) == Some(&true);
        let main_disabled = self.lookup(id, |f| f.main.as_ref()) == Some(&EntryOverride::Disabled);
        excluded || main_disabled
    }

    /// Whether the module contributes no file for `kind`
    pub fn is_file_excluded(&self, id: &str, kind: OutputKind) -> bool {
        match kind {
            OutputKind::Main => self.is_excluded(id),
            OutputKind::Style => {
                self.is_excluded(id)
                    || self.lookup(id, |f| f.style.as_ref()) == Some(&EntryOverride::Disabled)
            }
        }
    }

    /// Explicit dependency list replacing the module's own
    pub fn explicit_deps(&self, id: &str) -> &[String] {
        self.rules
            .get(id)
            .map(|rule| rule.deps.as_slice())
            .unwrap_or_default()
    }

    pub fn resolved_main(&self, id: &str) -> Option<&str> {
        match self.lookup(id, |f| f.main.as_ref()) {
            Some(EntryOverride::Path(path)) => Some(path.as_str()),
            _ => None,
        }
    }

    pub fn resolved_style(&self, id: &str) -> Option<&str> {
        match self.lookup(id, |f| f.style.as_ref()) {
            Some(EntryOverride::Path(path)) => Some(path.as_str()),
            _ => None,
        }
    }

    /// Override-resolved entry for the given output kind
    pub fn resolved_entry(&self, id: &str, kind: OutputKind) -> Option<&str> {
        match kind {
            OutputKind::Main => self.resolved_main(id),
            OutputKind::Style => self.resolved_style(id),
        }
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
