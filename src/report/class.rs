//! Message classification: per-category enable/verbosity policy.
//!
//! Every reported message carries a [`MessageClass`], either passed
//! explicitly or looked up by index in the [`ClassRegistry`]. A disabled
//! class, or a verbosity threshold above the reporter's current level,
//! drops the message silently.
//!
//! The registry is total: indexing past the end grows the backing
//! collection with default records, and an unknown name allocates a fresh
//! index and binds it, so repeated lookups of the same name are stable.

use rustc_hash::FxHashMap;

/// Enable flag plus verbosity threshold for one message category.
///
/// Defaults to enabled at threshold 0, which passes the default reporter
/// verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageClass {
    enabled: bool,
    verbosity: i32,
}

impl Default for MessageClass {
    fn default() -> Self {
        Self {
            enabled: true,
            verbosity: 0,
        }
    }
}

impl MessageClass {
    /// A class with an explicit enable flag and verbosity threshold.
    pub fn new(enabled: bool, verbosity: i32) -> Self {
        Self { enabled, verbosity }
    }

    /// An enabled class with the given verbosity threshold.
    pub fn with_verbosity(verbosity: i32) -> Self {
        Self {
            enabled: true,
            verbosity,
        }
    }

    /// Whether messages of this class are recorded at all.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Set the enable flag.
    pub fn set_enabled(&mut self, enabled: bool) -> &mut Self {
        self.enabled = enabled;
        self
    }

    /// The verbosity threshold; messages are suppressed when it exceeds
    /// the reporter's current verbosity.
    pub fn verbosity(&self) -> i32 {
        self.verbosity
    }

    /// Set the verbosity threshold.
    pub fn set_verbosity(&mut self, verbosity: i32) -> &mut Self {
        self.verbosity = verbosity;
        self
    }
}

/// Classification passed to a reporting entry point: an explicit record,
/// a registry index, or `()` for the default class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassSpec {
    /// An explicit classification record.
    Class(MessageClass),
    /// A registry index, resolved (and auto-allocated) at report time.
    Index(usize),
}

impl Default for ClassSpec {
    fn default() -> Self {
        ClassSpec::Class(MessageClass::default())
    }
}

impl From<MessageClass> for ClassSpec {
    fn from(class: MessageClass) -> Self {
        ClassSpec::Class(class)
    }
}

impl From<usize> for ClassSpec {
    fn from(index: usize) -> Self {
        ClassSpec::Index(index)
    }
}

impl From<()> for ClassSpec {
    fn from(_: ()) -> Self {
        ClassSpec::default()
    }
}

/// A growable collection of [`MessageClass`] records with an optional
/// name → index mapping.
///
/// All operations are total over the growing index space; none can fail.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: Vec<MessageClass>,
    by_name: FxHashMap<String, usize>,
}

impl ClassRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of allocated class slots.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no class slots have been allocated yet.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// The class at `index`, growing the collection with defaults if the
    /// index is out of range.
    pub fn get(&mut self, index: usize) -> &mut MessageClass {
        if index >= self.classes.len() {
            self.classes.resize_with(index + 1, MessageClass::default);
        }
        &mut self.classes[index]
    }

    /// The class registered under `name`.
    ///
    /// An unknown name allocates the next unused index and binds the name
    /// to it, so every later lookup of the same name lands on the same
    /// record.
    pub fn get_named(&mut self, name: &str) -> &mut MessageClass {
        let index = match self.by_name.get(name) {
            Some(&index) => index,
            None => {
                let index = self.classes.len();
                self.by_name.insert(name.to_string(), index);
                index
            }
        };
        self.get(index)
    }

    /// Explicitly bind `name` to `index`, allocating through `index`.
    pub fn register(&mut self, index: usize, name: impl Into<String>) -> &mut MessageClass {
        self.by_name.insert(name.into(), index);
        self.get(index)
    }

    /// The index bound to `name`, if any.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }
}
