//! Raw, untyped view of the recognised environment variables.

use crate::keys;
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;

/// Values of the recognised variables as read from the environment.
///
/// The process environment is read into one of these at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSnapshot {
    values: BTreeMap<&'static str, String>,
    non_unicode: BTreeSet<&'static str>,
}

impl RawSnapshot {
    /// Read every recognised variable from the process environment.
    pub fn from_process() -> Self {
        let snapshot = Self::from_os_vars(
            keys::INPUTS
                .iter()
                .filter_map(|key| std::env::var_os(key).map(|value| (OsString::from(*key), value))),
        );
        debug!("read environment snapshot (set={})", snapshot.values.len());
        snapshot
    }

    /// Build a snapshot from explicit pairs; unrecognised names are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut snapshot = Self::default();
        for (name, value) in vars {
            if let Some(key) = recognised(name.as_ref()) {
                snapshot.values.insert(key, value.into());
            }
        }
        snapshot
    }

    /// Build a snapshot from raw OS pairs, flagging values that are not unicode.
    pub(super) fn from_os_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        let mut snapshot = Self::default();
        for (name, value) in vars {
            let Some(key) = name.to_str().and_then(recognised) else {
                continue;
            };
            match value.into_string() {
                Ok(value) => {
                    snapshot.values.insert(key, value);
                }
                Err(value) => {
                    warn!("environment variable {key} is not valid unicode");
                    snapshot
                        .values
                        .insert(key, value.to_string_lossy().into_owned());
                    snapshot.non_unicode.insert(key);
                }
            }
        }
        snapshot
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Keys whose raw value was replaced by a lossy conversion.
    pub fn non_unicode_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.non_unicode.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn recognised(name: &str) -> Option<&'static str> {
    keys::INPUTS.iter().copied().find(|key| *key == name)
}
