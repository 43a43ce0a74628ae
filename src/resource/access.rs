//! Access policies
//!
//! A policy advertises which verbs make sense for a kind. It is consulted by
//! the view layer to decide which actions to offer; the cluster still has the
//! final word and refusals surface from the caller as errors.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// An API operation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verb {
    Get,
    List,
    Watch,
    Create,
    Update,
    Patch,
    Delete,
    DeleteCollection,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::List => "list",
            Verb::Watch => "watch",
            Verb::Create => "create",
            Verb::Update => "update",
            Verb::Patch => "patch",
            Verb::Delete => "delete",
            Verb::DeleteCollection => "deletecollection",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Verb::Get,
            Verb::List,
            Verb::Watch,
            Verb::Create,
            Verb::Update,
            Verb::Patch,
            Verb::Delete,
            Verb::DeleteCollection,
        ]
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::all()
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown verb: {}", s))
    }
}

/// The verbs a kind ever supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy(&'static [Verb]);

impl AccessPolicy {
    /// get/list/watch/create/update/patch/delete/deletecollection
    pub const ALL_VERBS: AccessPolicy = AccessPolicy(&[
        Verb::Get,
        Verb::List,
        Verb::Watch,
        Verb::Create,
        Verb::Update,
        Verb::Patch,
        Verb::Delete,
        Verb::DeleteCollection,
    ]);

    /// get/list/watch
    pub const READ_ONLY: AccessPolicy = AccessPolicy(&[Verb::Get, Verb::List, Verb::Watch]);

    pub fn verbs(&self) -> &'static [Verb] {
        self.0
    }

    pub fn allows(&self, verb: Verb) -> bool {
        self.0.contains(&verb)
    }

    pub fn is_read_only(&self) -> bool {
        self.0.iter().all(|v| AccessPolicy::READ_ONLY.0.contains(v))
    }

    /// Narrow the policy to read-only when the dashboard runs read-only
    pub fn clamp(self, read_only: bool) -> Self {
        if read_only {
            AccessPolicy::READ_ONLY
        } else {
            self
        }
    }
}

/// Verb grants for one kind in one namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessSpec {
    pub kind: &'static str,
    pub namespace: String,
    pub verbs: BTreeMap<Verb, bool>,
}

impl AccessSpec {
    pub fn new(kind: &'static str, namespace: &str, policy: AccessPolicy) -> Self {
        let verbs = Verb::all()
            .iter()
            .map(|&verb| (verb, policy.allows(verb)))
            .collect();
        Self {
            kind,
            namespace: namespace.to_string(),
            verbs,
        }
    }

    pub fn can(&self, verb: Verb) -> bool {
        self.verbs.get(&verb).copied().unwrap_or(false)
    }

    /// Granted verbs, in declaration order
    pub fn granted(&self) -> Vec<Verb> {
        self.verbs
            .iter()
            .filter(|(_, granted)| **granted)
            .map(|(verb, _)| *verb)
            .collect()
    }
}
