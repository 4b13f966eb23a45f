//! Table extension options

use crate::data::constants::{TABLE_PROCESSOR_NAME, TABLE_PROCESSOR_PRIORITY};

/// Options controlling how the table extension registers with a host
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Processor priority; higher priorities are tried first
    /// Default: 75.1 (ahead of paragraphs)
    pub priority: f64,

    /// Declare `|` as an escapable character on the host
    /// Default: true
    pub register_escape: bool,

    /// Name of the registered processor
    /// Default: "tables_extended"
    pub name: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            priority: TABLE_PROCESSOR_PRIORITY,
            register_escape: true,
            name: TABLE_PROCESSOR_NAME.to_string(),
        }
    }
}

impl TableOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_register_escape(mut self, register_escape: bool) -> Self {
        self.register_escape = register_escape;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
