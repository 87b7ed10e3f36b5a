use std::fmt;

/// Something wrong with a masm source line: an unknown opcode, an argument
/// of the wrong shape, a label that never attaches to an instruction, or a
/// line the grammar rejects outright.
///
/// Carries a 1-based source line number rather than the raw
/// `pest::error::Error` this crate's grammar produces internally, because
/// callers (the `metaii` binary in particular) want to report failures the
/// same way regardless of whether they came from the grammar or from a
/// later semantic check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoaderError {
    line: u32,
    message: String,
    path: Option<String>,
}

impl LoaderError {
    pub fn new(line: u32, message: impl Into<String>) -> LoaderError {
        LoaderError {
            line,
            message: message.into(),
            path: None,
        }
    }

    /// Attaches a file path so `Display` renders `"<path>:<line>: ..."`,
    /// mirroring `vasm::Error::with_path` from this workspace's other
    /// source-consuming crate.
    pub fn with_path(mut self, path: impl Into<String>) -> LoaderError {
        self.path = Some(path.into());
        self
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}:{}: {}", path, self.line, self.message),
            None => write!(f, "{}: {}", self.line, self.message),
        }
    }
}

impl std::error::Error for LoaderError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_without_path() {
        let err = LoaderError::new(3, "unknown opcode 'FOO'");
        assert_eq!(format!("{}", err), "3: unknown opcode 'FOO'");
    }

    #[test]
    fn display_with_path() {
        let err = LoaderError::new(3, "unknown opcode 'FOO'").with_path("prog.masm");
        assert_eq!(format!("{}", err), "prog.masm:3: unknown opcode 'FOO'");
    }
}
