use crate::opcode::Opcode;

/// The argument carried by an [`Instruction`], if any. Which variant is
/// valid for a given opcode is fixed by [`Opcode::arg_shape`] — the loader
/// enforces that at parse time, the VM assumes it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Argument {
    None,
    StringLiteral(String),
    LabelRef(String),
}

impl Argument {
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Argument::LabelRef(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn as_string_literal(&self) -> Option<&str> {
        match self {
            Argument::StringLiteral(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// One step of a META II program: an opcode, its argument, and the labels
/// (if any) that target this position.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub opcode: Opcode,
    pub arg: Argument,
    pub labels: Vec<String>,
}

impl Instruction {
    pub fn new(opcode: Opcode, arg: Argument, labels: Vec<String>) -> Instruction {
        Instruction {
            opcode,
            arg,
            labels,
        }
    }

    pub fn bare(opcode: Opcode) -> Instruction {
        Instruction::new(opcode, Argument::None, Vec::new())
    }

    pub fn with_label_arg(opcode: Opcode, label: impl Into<String>) -> Instruction {
        Instruction::new(opcode, Argument::LabelRef(label.into()), Vec::new())
    }

    pub fn with_string_arg(opcode: Opcode, s: impl Into<String>) -> Instruction {
        Instruction::new(opcode, Argument::StringLiteral(s.into()), Vec::new())
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Instruction {
        self.labels.push(label.into());
        self
    }
}
