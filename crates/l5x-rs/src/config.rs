// crates/l5x-rs/src/config.rs

//! Options controlling how documents are read and written.

/// Options for [`Document::parse_with`](crate::Document::parse_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Trims leading and trailing whitespace from element text and drops
    /// text that is whitespace only. CDATA content is never trimmed.
    pub trim_text: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { trim_text: true }
    }
}

/// Options for [`Document::write_with`](crate::Document::write_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Emits the `<?xml ...?>` declaration in front of the root element.
    pub declaration: bool,
    /// Indentation byte and width per nesting level, handed to the
    /// `quick-xml` writer. `None` writes the whole tree on a single line.
    pub indent: Option<(u8, usize)>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            declaration: true,
            indent: Some((b' ', 2)),
        }
    }
}

impl WriteOptions {
    /// Single-line output without a declaration, mostly useful in tests and logs.
    pub fn compact() -> Self {
        Self {
            declaration: false,
            indent: None,
        }
    }
}
