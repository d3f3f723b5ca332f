//! Build settings and deep merge.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single build setting value.
///
/// Tables merge recursively; every other value kind is replaced wholesale
/// by the overriding side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<SettingValue>),
    Table(IndexMap<String, SettingValue>),
}

impl SettingValue {
    /// Deep merge `other` into `self`.
    pub fn merge(&mut self, other: &SettingValue) {
        match (self, other) {
            (SettingValue::Table(base), SettingValue::Table(over)) => merge_tables(base, over),
            (slot, value) => *slot = value.clone(),
        }
    }

    /// The string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::String(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::String(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Integer(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Float(value)
    }
}

fn merge_tables(base: &mut IndexMap<String, SettingValue>, over: &IndexMap<String, SettingValue>) {
    for (key, value) in over {
        match base.get_mut(key) {
            Some(existing) => existing.merge(value),
            None => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

/// An ordered mapping of build setting names to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(IndexMap<String, SettingValue>);

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a setting.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SettingValue)> {
        self.0.iter()
    }

    /// Deep merge `other` into these settings; `other` wins on conflicts.
    pub fn merge(&mut self, other: &Settings) {
        merge_tables(&mut self.0, &other.0);
    }

    /// Return `base` deep-merged with `over`.
    pub fn merged(base: &Settings, over: &Settings) -> Settings {
        let mut result = base.clone();
        result.merge(over);
        result
    }
}

impl<K: Into<String>, V: Into<SettingValue>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
