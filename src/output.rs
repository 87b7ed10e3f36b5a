use std::io::{self, Write};

const INSTRUCTION_COLUMN: usize = 8;
const LABEL_COLUMN: usize = 0;

/// Accumulates fragments for the current output line and flushes complete
/// lines to a caller-supplied sink. Emitted lines are a pure function of
/// the `push`/`push_token` calls since the last flush and the column set
/// by [`OutputAssembler::set_label_column`].
pub struct OutputAssembler<W: Write> {
    sink: W,
    line: Vec<String>,
    column: usize,
}

impl<W: Write> OutputAssembler<W> {
    pub fn new(sink: W) -> OutputAssembler<W> {
        OutputAssembler {
            sink,
            line: Vec::new(),
            column: INSTRUCTION_COLUMN,
        }
    }

    /// `CL s`
    pub fn push(&mut self, fragment: &str) {
        self.line.push(fragment.to_owned());
    }

    /// `LB`: the next flush is prefixed by 0 spaces instead of 8.
    pub fn set_label_column(&mut self) {
        self.column = LABEL_COLUMN;
    }

    /// `OUT`: write the current column's worth of spaces, the concatenated
    /// fragments, and a trailing newline, then reset for the next line.
    pub fn flush(&mut self) -> io::Result<()> {
        for _ in 0..self.column {
            self.sink.write_all(b" ")?;
        }
        for fragment in &self.line {
            self.sink.write_all(fragment.as_bytes())?;
        }
        self.sink.write_all(b"\n")?;

        self.line.clear();
        self.column = INSTRUCTION_COLUMN;
        Ok(())
    }
}
