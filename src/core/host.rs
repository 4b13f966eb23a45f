//! Block host
//!
//! A small block-structured document engine that the table processor plugs
//! into: documents are split into blank-line separated blocks, and each
//! block is offered to registered processors in priority order until one
//! claims it.
//!
//! ## Example
//!
//! ```rust
//! use spantables::host::{BlockParser, TableExtension};
//!
//! let mut parser = BlockParser::new();
//! parser.use_extension(&TableExtension::new());
//!
//! let doc = parser.parse_document("| a | b |\n|---|---|\n| 1 | 2 |").unwrap();
//! assert_eq!(doc.children()[0].tag().name(), "table");
//! ```

use std::collections::VecDeque;

use fxhash::FxHashMap;

use crate::core::node::{Node, Tag};
use crate::core::options::TableOptions;
use crate::core::table::{build_table, is_candidate_table, recognize};
use crate::data::constants::{
    DEFAULT_ESCAPED_CHARS, PARAGRAPH_PROCESSOR_NAME, PARAGRAPH_PROCESSOR_PRIORITY,
};
use crate::utils::error::{TableError, TableResult};

/// A processor for one kind of block
pub trait BlockProcessor: Send + Sync {
    /// Whether this processor wants the block
    fn test(&self, parent: &Node, block: &str) -> bool;

    /// Consume the front block of `blocks` and attach its tree to `parent`
    ///
    /// Returns `Ok(false)` when the block turned out not to fit, in which
    /// case it is left in place for the next processor.
    fn run(&self, parent: &mut Node, blocks: &mut VecDeque<String>) -> TableResult<bool>;
}

/// Something that configures a [`BlockParser`] once during setup
pub trait Extension {
    fn extend(&self, parser: &mut BlockParser);
}

struct Registered {
    name: String,
    priority: f64,
    processor: Box<dyn BlockProcessor>,
}

/// Priority ordered block processor registry and document driver
pub struct BlockParser {
    processors: Vec<Registered>,
    index: FxHashMap<String, usize>,
    escaped_chars: Vec<char>,
}

impl Default for BlockParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockParser {
    /// Create a parser with the paragraph fallback registered
    pub fn new() -> Self {
        let mut parser = Self::empty();
        parser.register(
            PARAGRAPH_PROCESSOR_NAME,
            PARAGRAPH_PROCESSOR_PRIORITY,
            Box::new(ParagraphProcessor),
        );
        parser
    }

    /// Create a parser without any processor
    pub fn empty() -> Self {
        BlockParser {
            processors: Vec::new(),
            index: FxHashMap::default(),
            escaped_chars: DEFAULT_ESCAPED_CHARS.to_vec(),
        }
    }

    /// Apply an extension
    pub fn use_extension(&mut self, extension: &dyn Extension) -> &mut Self {
        extension.extend(self);
        self
    }

    /// Register a processor
    ///
    /// Higher priorities run first; equal priorities keep registration
    /// order. Registering an existing name replaces that processor.
    pub fn register(&mut self, name: &str, priority: f64, processor: Box<dyn BlockProcessor>) {
        self.deregister(name);
        let position = self
            .processors
            .iter()
            .position(|p| p.priority < priority)
            .unwrap_or(self.processors.len());
        self.processors.insert(
            position,
            Registered {
                name: name.to_string(),
                priority,
                processor,
            },
        );
        self.reindex();
        tracing::debug!(name, priority, position, "registered block processor");
    }

    /// Remove a processor by name, returning whether it was registered
    pub fn deregister(&mut self, name: &str) -> bool {
        match self.index.get(name).copied() {
            Some(position) => {
                self.processors.remove(position);
                self.reindex();
                true
            }
            None => false,
        }
    }

    fn reindex(&mut self) {
        self.index = self
            .processors
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect();
    }

    /// Look up a processor by name
    pub fn get(&self, name: &str) -> Option<&dyn BlockProcessor> {
        self.index
            .get(name)
            .map(|&i| self.processors[i].processor.as_ref())
    }

    /// Priority of a registered processor
    pub fn priority(&self, name: &str) -> Option<f64> {
        self.index.get(name).map(|&i| self.processors[i].priority)
    }

    /// Processor names in the order they are tried
    pub fn names(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.name.as_str()).collect()
    }

    /// Characters that may be escaped with a backslash
    pub fn escaped_chars(&self) -> &[char] {
        &self.escaped_chars
    }

    pub fn is_escapable(&self, c: char) -> bool {
        self.escaped_chars.contains(&c)
    }

    /// Declare an escapable character, ignoring duplicates
    pub fn add_escaped_char(&mut self, c: char) {
        if !self.is_escapable(c) {
            self.escaped_chars.push(c);
        }
    }

    /// Parse a whole document into a tree of blocks
    pub fn parse_document(&self, text: &str) -> TableResult<Node> {
        let mut root = Node::document();
        let mut blocks: VecDeque<String> = split_blocks(text).into();
        self.parse_blocks(&mut root, &mut blocks)?;
        Ok(root)
    }

    /// Feed blocks to the processors until none are left
    pub fn parse_blocks(&self, parent: &mut Node, blocks: &mut VecDeque<String>) -> TableResult<()> {
        while !blocks.is_empty() {
            let mut handled = false;
            for registered in &self.processors {
                if !registered.processor.test(parent, &blocks[0]) {
                    continue;
                }
                tracing::trace!(processor = %registered.name, "dispatching block");
                if registered.processor.run(parent, blocks)? {
                    handled = true;
                    break;
                }
            }
            if !handled {
                return Err(TableError::invalid(format!(
                    "no block processor accepted block {:?}",
                    blocks[0]
                )));
            }
        }
        Ok(())
    }
}

/// Split a document into blank-line separated blocks
///
/// Line endings are normalized to `\n`; whitespace-only lines separate
/// blocks and are dropped.
pub fn split_blocks(text: &str) -> Vec<String> {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }
    blocks
}

/// Fallback processor: every block becomes a paragraph of raw text
#[derive(Debug, Default, Clone, Copy)]
pub struct ParagraphProcessor;

impl BlockProcessor for ParagraphProcessor {
    fn test(&self, _parent: &Node, _block: &str) -> bool {
        true
    }

    fn run(&self, parent: &mut Node, blocks: &mut VecDeque<String>) -> TableResult<bool> {
        let block = blocks
            .pop_front()
            .ok_or_else(|| TableError::invalid("no block to process"))?;
        parent.push(Node::new(Tag::Paragraph).with_text(block));
        Ok(true)
    }
}

/// Block processor for pipe tables
///
/// Holds no per-block state: `run` recognizes the block again instead of
/// relying on what `test` saw.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableProcessor;

impl BlockProcessor for TableProcessor {
    fn test(&self, _parent: &Node, block: &str) -> bool {
        let lines: Vec<&str> = block.split('\n').collect();
        is_candidate_table(&lines) && recognize(&lines).is_some()
    }

    fn run(&self, parent: &mut Node, blocks: &mut VecDeque<String>) -> TableResult<bool> {
        let block = blocks
            .front()
            .ok_or_else(|| TableError::invalid("no block to process"))?;
        let lines: Vec<&str> = block.split('\n').collect();
        let Some(layout) = recognize(&lines) else {
            return Ok(false);
        };

        let table = build_table(&lines, &layout)?;
        parent.push(table);
        blocks.pop_front();
        Ok(true)
    }
}

/// Registers the table processor on a host
#[derive(Debug, Clone, Default)]
pub struct TableExtension {
    options: TableOptions,
}

impl TableExtension {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TableOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }
}

impl Extension for TableExtension {
    fn extend(&self, parser: &mut BlockParser) {
        if self.options.register_escape {
            parser.add_escaped_char('|');
        }
        parser.register(
            &self.options.name,
            self.options.priority,
            Box::new(TableProcessor),
        );
    }
}
