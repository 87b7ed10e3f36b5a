use std::collections::HashMap;

use crate::error::ProgramError;
use crate::instruction::Instruction;

/// A loaded META II program: the instruction stream plus the label name to
/// instruction index mapping the dispatcher uses for every branch, call,
/// and the `ADR` entry-point directive.
#[derive(Debug, PartialEq)]
pub struct Program {
    instructions: Vec<Instruction>,
    label_index: HashMap<String, usize>,
}

impl Program {
    /// Builds a [`Program`] from an already-parsed instruction stream,
    /// rejecting duplicate label definitions. This is the "program loader"
    /// of the VM core proper — it never looks at masm text, only at
    /// [`Instruction`]s, however they were constructed.
    pub fn new(instructions: Vec<Instruction>) -> Result<Program, ProgramError> {
        if instructions.is_empty() {
            return Err(ProgramError::EmptyProgram);
        }

        let mut label_index = HashMap::new();
        for (pc, instr) in instructions.iter().enumerate() {
            for label in &instr.labels {
                if label_index.insert(label.clone(), pc).is_some() {
                    return Err(ProgramError::DuplicateLabel {
                        label: label.clone(),
                    });
                }
            }
        }

        for instr in &instructions {
            if let Some(label) = instr.arg.as_label() {
                if !label_index.contains_key(label) {
                    return Err(ProgramError::UnknownLabel {
                        label: label.to_owned(),
                    });
                }
            }
        }

        Ok(Program {
            instructions,
            label_index,
        })
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, pc: usize) -> Option<&Instruction> {
        self.instructions.get(pc)
    }

    pub fn resolve(&self, label: &str) -> Result<usize, ProgramError> {
        self.label_index
            .get(label)
            .copied()
            .ok_or_else(|| ProgramError::UnknownLabel {
                label: label.to_owned(),
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::instruction::Instruction;
    use crate::opcode::Opcode;

    #[test]
    fn resolves_labels_to_their_position() {
        let program = Program::new(vec![
            Instruction::bare(Opcode::SET),
            Instruction::bare(Opcode::END).labeled("DONE"),
        ])
        .unwrap();

        assert_eq!(program.resolve("DONE"), Ok(1));
        assert_eq!(
            program.resolve("MISSING"),
            Err(ProgramError::UnknownLabel {
                label: "MISSING".to_owned()
            })
        );
    }

    #[test]
    fn rejects_duplicate_labels() {
        let result = Program::new(vec![
            Instruction::bare(Opcode::SET).labeled("L"),
            Instruction::bare(Opcode::END).labeled("L"),
        ]);

        assert_eq!(
            result,
            Err(ProgramError::DuplicateLabel {
                label: "L".to_owned()
            })
        );
    }

    #[test]
    fn rejects_a_branch_target_with_no_matching_label() {
        let result = Program::new(vec![
            Instruction::with_label_arg(Opcode::B, "NOWHERE"),
            Instruction::bare(Opcode::END),
        ]);

        assert_eq!(
            result,
            Err(ProgramError::UnknownLabel {
                label: "NOWHERE".to_owned()
            })
        );
    }

    #[test]
    fn rejects_empty_program() {
        assert_eq!(Program::new(Vec::new()), Err(ProgramError::EmptyProgram));
    }

    #[test]
    fn stacked_labels_share_one_target() {
        let program = Program::new(vec![Instruction::bare(Opcode::END)
            .labeled("A")
            .labeled("B")])
        .unwrap();

        assert_eq!(program.resolve("A"), Ok(0));
        assert_eq!(program.resolve("B"), Ok(0));
    }
}
