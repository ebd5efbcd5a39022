//! MOL / SD file record parser
//!
//! Splits a line sequence into [`Record`]s with a two-state machine.
//!
//! # File Format
//! ```text
//! aspirin                      <- header, counts, atoms, bonds:
//!   ...                           kept verbatim as the record source
//! M  END                       <- closes the connection table
//! > <ID>                       <- SD field tag (SDF only)
//! A1                           <- field value
//!
//! $$$$                         <- closes the record (SDF only)
//! ```
//!
//! In MOL mode the first `M  END` completes the one and only record. In SDF
//! mode every record must be closed by `$$$$`; an unterminated trailing
//! record is dropped with a warning.

use std::collections::HashSet;
use tracing::{debug, error, info, warn};

use crate::models::{FieldMap, Format, Record};

/// Line that closes a connection-table block
pub const MOL_END: &str = "M  END";

/// Line that closes an SD record
pub const RECORD_DELIMITER: &str = "$$$$";

/// Prefix of an SD field tag line, e.g. `> <ID>`
pub const TAG_PREFIX: &str = "> <";

/// Parser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Accumulating connection-table text
    ReadingBlock,
    /// Scanning SD field tags and values after `M  END`
    ReadingFields,
}

/// Everything one parse produced
#[derive(Debug, Default)]
pub struct ParseOutput {
    /// Completed records in input order
    pub records: Vec<Record>,

    /// Distinct field names from well-formed tags, in first-seen order
    pub field_names: Vec<String>,

    /// Tag lines skipped because the closing `>` was missing
    pub malformed_tags: usize,

    /// Records dropped because they were never closed
    pub incomplete_records: usize,
}

/// Parser for MOL and SD text
pub struct RecordParser {
    format: Format,
}

impl RecordParser {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Parse a full line sequence
    ///
    /// Never fails: malformed tags and unterminated records are logged and
    /// counted in the returned [`ParseOutput`].
    pub fn parse<I, S>(&self, lines: I) -> ParseOutput
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        debug!(format = %self.format, "Converting file");

        let mut ctx = ParserContext::new(self.format);
        let mut line_num = 0;

        for line in lines {
            line_num += 1;
            if ctx.finished {
                ctx.ignored_lines += 1;
                continue;
            }
            ctx.feed(line_num, line.as_ref());
        }

        let output = ctx.finish();
        info!(
            format = %self.format,
            records = output.records.len(),
            fields = output.field_names.len(),
            malformed_tags = output.malformed_tags,
            incomplete_records = output.incomplete_records,
            "Parsed {} lines",
            line_num
        );
        output
    }
}

/// Mutable state of one parse; created per call and consumed by `finish`
struct ParserContext {
    format: Format,
    state: ParseState,

    /// Record being built, started lazily on the first line after a delimiter
    pending: Option<Record>,
    block: String,

    /// Field tag seen on the previous line, waiting for its value
    awaiting_value: Option<String>,
    values: FieldMap<String>,

    field_names: Vec<String>,
    seen_names: HashSet<String>,

    records: Vec<Record>,
    malformed_tags: usize,
    incomplete_records: usize,

    /// Set once a MOL-mode record is complete. A MOL file holds one
    /// molecule, so later blocks are ignored rather than parsed as records.
    finished: bool,
    ignored_lines: usize,
}

impl ParserContext {
    fn new(format: Format) -> Self {
        Self {
            format,
            state: ParseState::ReadingBlock,
            pending: None,
            block: String::new(),
            awaiting_value: None,
            values: FieldMap::new(),
            field_names: Vec::new(),
            seen_names: HashSet::new(),
            records: Vec::new(),
            malformed_tags: 0,
            incomplete_records: 0,
            finished: false,
            ignored_lines: 0,
        }
    }

    fn feed(&mut self, line_num: usize, line: &str) {
        if self.pending.is_none() {
            self.pending = Some(Record::new());
            self.block.clear();
        }

        match self.state {
            ParseState::ReadingBlock => self.read_block_line(line_num, line),
            ParseState::ReadingFields => self.read_field_line(line_num, line),
        }
    }

    fn read_block_line(&mut self, line_num: usize, line: &str) {
        if is_sentinel(line, RECORD_DELIMITER) {
            // A delimiter before M  END: the block was never closed.
            warn!(line = line_num, "Record delimiter before '{}', dropping record", MOL_END);
            self.incomplete_records += 1;
            self.pending = None;
            return;
        }

        self.block.push_str(line);
        self.block.push('\n');

        if is_sentinel(line, MOL_END) {
            self.close_block();
        }
    }

    fn close_block(&mut self) {
        let Some(mut record) = self.pending.take() else {
            return;
        };
        record.source = std::mem::take(&mut self.block);

        match self.format {
            Format::Mol => {
                self.records.push(record);
                self.finished = true;
            },
            Format::Sdf => {
                self.pending = Some(record);
                self.values = FieldMap::new();
                self.awaiting_value = None;
                self.state = ParseState::ReadingFields;
            },
        }
    }

    fn read_field_line(&mut self, line_num: usize, line: &str) {
        if let Some(name) = self.awaiting_value.take() {
            self.values.insert(name, line.trim_end().to_string());
        }

        if let Some(rest) = line.strip_prefix(TAG_PREFIX) {
            match rest.find('>') {
                Some(end) => {
                    let name = &rest[..end];
                    self.note_field_name(name);
                    self.awaiting_value = Some(name.to_string());
                },
                None => {
                    error!(line = line_num, tag = line, "Invalid SDF file format: unterminated field tag");
                    self.malformed_tags += 1;
                },
            }
        }

        if is_sentinel(line, RECORD_DELIMITER) {
            self.close_record();
        }
    }

    fn close_record(&mut self) {
        if let Some(mut record) = self.pending.take() {
            record.values = std::mem::take(&mut self.values);
            self.records.push(record);
        }
        self.awaiting_value = None;
        self.state = ParseState::ReadingBlock;
    }

    fn note_field_name(&mut self, name: &str) {
        if self.seen_names.insert(name.to_string()) {
            self.field_names.push(name.to_string());
        }
    }

    fn finish(mut self) -> ParseOutput {
        let unterminated = match self.state {
            ParseState::ReadingFields => true,
            ParseState::ReadingBlock => self.pending.is_some() && !self.block.trim().is_empty(),
        };

        if unterminated && !self.finished {
            warn!(
                format = %self.format,
                "Input ended inside a record, dropping it"
            );
            self.incomplete_records += 1;
        }

        if self.ignored_lines > 0 {
            debug!(lines = self.ignored_lines, "Ignored lines after the MOL block");
        }

        ParseOutput {
            records: self.records,
            field_names: self.field_names,
            malformed_tags: self.malformed_tags,
            incomplete_records: self.incomplete_records,
        }
    }
}

/// Sentinel comparison, tolerant of trailing whitespace
fn is_sentinel(line: &str, sentinel: &str) -> bool {
    line.trim_end() == sentinel
}
