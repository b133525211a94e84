//! A flat, string-keyed settings store.
//!
//! [`Settings`] maps dotted string keys to string-backed
//! [`SettingsValue`]s with typed read-out. It is a plain value type:
//! create one per tool (or per subsystem via
//! [`sub_section`](Settings::sub_section)) and pass it around; there is
//! deliberately no process-wide instance.
//!
//! # Example
//!
//! ```
//! use termreport::settings::{Settings, Switch};
//!
//! let mut settings = Settings::new();
//! settings.insert_key_value("color=off");
//! settings.insert_key_value("verbose");
//! settings.set("runner.jobs", 4);
//!
//! assert_eq!(settings.as_switch("color"), Switch::Off);
//! assert!(settings.get("verbose").is_on());
//! assert_eq!(settings.get("runner.jobs").parse::<u32>(), 4);
//! ```

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;

/// A single setting: a string with typed views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsValue(String);

/// The empty value returned for missing keys.
static NONE: SettingsValue = SettingsValue(String::new());

impl SettingsValue {
    /// A value holding the given text.
    pub fn new(value: impl Into<String>) -> Self {
        SettingsValue(value.into())
    }

    /// Whether the value spells "on": `1`, `true`, `T`, or `on`.
    pub fn is_on(&self) -> bool {
        matches!(self.0.as_str(), "1" | "true" | "T" | "on")
    }

    /// Whether the value spells "off": `0`, `false`, `F`, or `off`.
    pub fn is_off(&self) -> bool {
        matches!(self.0.as_str(), "0" | "false" | "F" | "off")
    }

    /// Whether the value is unset (empty).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse as `T`, falling back to `T::default()` when the value does
    /// not parse. Total, like every other settings read.
    pub fn parse<T: FromStr + Default>(&self) -> T {
        self.0.parse().unwrap_or_default()
    }
}

impl From<&str> for SettingsValue {
    fn from(value: &str) -> Self {
        SettingsValue(value.to_string())
    }
}

impl From<String> for SettingsValue {
    fn from(value: String) -> Self {
        SettingsValue(value)
    }
}

/// The three-way-plus-unset reading of a boolean-ish setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    /// The key is not present.
    Undefined,
    /// The value spells "on".
    On,
    /// The value spells "off".
    Off,
    /// The key is present but spells neither.
    Neither,
}

/// A flat map from dotted string keys to [`SettingsValue`]s.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    map: FxHashMap<String, SettingsValue>,
}

impl Settings {
    /// An empty settings store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The value under `key`; the empty value when missing.
    pub fn get(&self, key: &str) -> &SettingsValue {
        self.map.get(key).unwrap_or(&NONE)
    }

    /// Set `key` to the textual form of `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        self.map.insert(key.into(), SettingsValue(value.to_string()));
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// The number of stored settings.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Read `key` as a [`Switch`].
    pub fn as_switch(&self, key: &str) -> Switch {
        match self.map.get(key) {
            None => Switch::Undefined,
            Some(value) if value.is_on() => Switch::On,
            Some(value) if value.is_off() => Switch::Off,
            Some(_) => Switch::Neither,
        }
    }

    /// Insert a command-line style `key=value` pair; a bare `key` (no
    /// `=`) is stored as `"true"`.
    pub fn insert_key_value(&mut self, pair: &str) {
        match pair.split_once('=') {
            Some((key, value)) => self.set(key, value),
            None => self.set(pair, "true"),
        }
    }

    /// The settings under `section.`, re-keyed with the prefix stripped.
    ///
    /// The section match is case-insensitive; only the dot-separated
    /// first segment is compared.
    pub fn sub_section(&self, section: &str) -> Settings {
        let mut sub = Settings::new();
        for (key, value) in &self.map {
            if key.len() > section.len()
                && key.is_char_boundary(section.len())
                && key.as_bytes()[section.len()] == b'.'
                && key[..section.len()].eq_ignore_ascii_case(section)
            {
                sub.map
                    .insert(key[section.len() + 1..].to_string(), value.clone());
            }
        }
        sub
    }

    /// Iterate over all key/value pairs, unordered.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingsValue)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_empty() {
        let settings = Settings::new();
        assert!(settings.get("nope").is_empty());
        assert_eq!(settings.get("nope").parse::<u32>(), 0);
        assert_eq!(settings.as_switch("nope"), Switch::Undefined);
    }

    #[test]
    fn on_off_spellings() {
        for spelling in ["1", "true", "T", "on"] {
            assert!(SettingsValue::from(spelling).is_on(), "{spelling}");
        }
        for spelling in ["0", "false", "F", "off"] {
            assert!(SettingsValue::from(spelling).is_off(), "{spelling}");
        }
        assert!(!SettingsValue::from("maybe").is_on());
        assert!(!SettingsValue::from("maybe").is_off());
    }

    #[test]
    fn switch_reading() {
        let mut settings = Settings::new();
        settings.set("a", "on");
        settings.set("b", "0");
        settings.set("c", "whatever");
        assert_eq!(settings.as_switch("a"), Switch::On);
        assert_eq!(settings.as_switch("b"), Switch::Off);
        assert_eq!(settings.as_switch("c"), Switch::Neither);
        assert_eq!(settings.as_switch("d"), Switch::Undefined);
    }

    #[test]
    fn key_value_insertion() {
        let mut settings = Settings::new();
        settings.insert_key_value("jobs=8");
        settings.insert_key_value("fast");
        settings.insert_key_value("empty=");
        assert_eq!(settings.get("jobs").parse::<u32>(), 8);
        assert!(settings.get("fast").is_on());
        assert!(settings.get("empty").is_empty());
    }

    #[test]
    fn typed_values_round_trip_as_text() {
        let mut settings = Settings::new();
        settings.set("threshold", 2.5f64);
        settings.set("count", 12u64);
        assert_eq!(settings.get("threshold").as_str(), "2.5");
        assert_eq!(settings.get("threshold").parse::<f64>(), 2.5);
        assert_eq!(settings.get("count").parse::<u64>(), 12);
    }

    #[test]
    fn parse_failure_yields_default() {
        let mut settings = Settings::new();
        settings.set("jobs", "lots");
        assert_eq!(settings.get("jobs").parse::<u32>(), 0);
    }

    #[test]
    fn sub_section_strips_prefix_case_insensitively() {
        let mut settings = Settings::new();
        settings.set("Runner.jobs", 4);
        settings.set("runner.nice", "on");
        settings.set("runners.other", 1);
        settings.set("runner", "bare key, not a section entry");

        let sub = settings.sub_section("runner");
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.get("jobs").parse::<u32>(), 4);
        assert!(sub.get("nice").is_on());
        assert!(!sub.contains("other"));
    }
}
