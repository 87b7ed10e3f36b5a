use std::io::{self, Write};

use crate::frame::ActivationStack;
use crate::instruction::Argument;
use crate::opcode::Opcode;
use crate::output::OutputAssembler;
use crate::program::Program;
use crate::scanner::Scanner;

/// How a run terminated. Exactly one of these characterises any run that
/// returns — the VM always halts, by construction, once `is_err` or
/// `is_done` is set.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// `END` was reached, or `R` returned below the sentinel frame.
    Halted,
    /// `BE` fired with a false `switch`. Anything already flushed to the
    /// sink remains there.
    RecognitionError,
}

/// A single META II virtual machine run: owns the input cursor, the output
/// sink, and the activation stack for the lifetime of one [`Vm::run`] call.
pub struct Vm<'i, W: Write> {
    scanner: Scanner<'i>,
    output: OutputAssembler<W>,
    stack: ActivationStack,
    token: Option<String>,
    switch: bool,
    pc: usize,
}

impl<'i, W: Write> Vm<'i, W> {
    pub fn new(input: &'i str, sink: W) -> Vm<'i, W> {
        Vm {
            scanner: Scanner::new(input),
            output: OutputAssembler::new(sink),
            stack: ActivationStack::new(0),
            token: None,
            switch: false,
            pc: 0,
        }
    }

    /// Runs `program` to completion, starting at instruction 0 (by
    /// convention the first instruction is `ADR <main-rule>`, which jumps
    /// to the entry point without executing anything else first).
    pub fn run(&mut self, program: &Program) -> io::Result<Outcome> {
        self.run_traced(program, &mut |_| {})
    }

    /// As [`Vm::run`], but invokes `trace` with a one-line diagnostic
    /// before every step. The trace format is a debugging aid, not a
    /// contract, and may change without notice.
    pub fn run_traced(
        &mut self,
        program: &Program,
        trace: &mut dyn FnMut(&str),
    ) -> io::Result<Outcome> {
        let sentinel_return_pc = program.len();
        self.stack = ActivationStack::new(sentinel_return_pc);

        loop {
            let instr = program
                .get(self.pc)
                .expect("pc always stays in range for a well-formed Program");

            trace(&format!(
                "pc={} op={:?} switch={} token={:?} input={:?}",
                self.pc,
                instr.opcode,
                self.switch,
                self.token,
                self.scanner.remaining()
            ));

            match instr.opcode {
                Opcode::TST => {
                    let literal = instr
                        .arg
                        .as_string_literal()
                        .expect("TST carries a string-literal argument");
                    self.switch = self.scanner.tst(literal);
                    self.pc += 1;
                }
                Opcode::ID => {
                    match self.scanner.id() {
                        Some(token) => {
                            self.token = Some(token);
                            self.switch = true;
                        }
                        None => self.switch = false,
                    }
                    self.pc += 1;
                }
                Opcode::NUM => {
                    match self.scanner.num() {
                        Some(token) => {
                            self.token = Some(token);
                            self.switch = true;
                        }
                        None => self.switch = false,
                    }
                    self.pc += 1;
                }
                Opcode::SR => {
                    match self.scanner.sr() {
                        Some(token) => {
                            self.token = Some(token);
                            self.switch = true;
                        }
                        None => self.switch = false,
                    }
                    self.pc += 1;
                }
                Opcode::CLL => {
                    let label = instr.arg.as_label().expect("CLL carries a label argument");
                    let target = program
                        .resolve(label)
                        .expect("a well-formed Program resolves every label it references");
                    self.stack.call(self.pc + 1);
                    self.pc = target;
                }
                Opcode::R => match self.stack.ret() {
                    Some(return_pc) => self.pc = return_pc,
                    None => return Ok(Outcome::Halted),
                },
                Opcode::SET => {
                    self.switch = true;
                    self.pc += 1;
                }
                Opcode::B => {
                    let label = instr.arg.as_label().expect("B carries a label argument");
                    self.pc = program
                        .resolve(label)
                        .expect("a well-formed Program resolves every label it references");
                }
                Opcode::BT => {
                    let label = instr.arg.as_label().expect("BT carries a label argument");
                    if self.switch {
                        self.pc = program
                            .resolve(label)
                            .expect("a well-formed Program resolves every label it references");
                    } else {
                        self.pc += 1;
                    }
                }
                Opcode::BF => {
                    let label = instr.arg.as_label().expect("BF carries a label argument");
                    if !self.switch {
                        self.pc = program
                            .resolve(label)
                            .expect("a well-formed Program resolves every label it references");
                    } else {
                        self.pc += 1;
                    }
                }
                Opcode::BE => {
                    if self.switch {
                        self.pc += 1;
                    } else {
                        return Ok(Outcome::RecognitionError);
                    }
                }
                Opcode::CL => {
                    let literal = instr
                        .arg
                        .as_string_literal()
                        .expect("CL carries a string-literal argument");
                    self.output.push(literal);
                    self.pc += 1;
                }
                Opcode::CI => {
                    let token = self.token.as_deref().unwrap_or("");
                    self.output.push(token);
                    self.pc += 1;
                }
                Opcode::GN1 => {
                    let label = self.stack.gn1().to_owned();
                    self.output.push(&label);
                    self.pc += 1;
                }
                Opcode::GN2 => {
                    let label = self.stack.gn2().to_owned();
                    self.output.push(&label);
                    self.pc += 1;
                }
                Opcode::LB => {
                    self.output.set_label_column();
                    self.pc += 1;
                }
                Opcode::OUT => {
                    self.output.flush()?;
                    self.pc += 1;
                }
                Opcode::ADR => {
                    let label = instr.arg.as_label().expect("ADR carries a label argument");
                    self.pc = program
                        .resolve(label)
                        .expect("a well-formed Program resolves every label it references");
                }
                Opcode::END => return Ok(Outcome::Halted),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::instruction::Instruction;
    use crate::program::Program;

    fn run(instrs: Vec<Instruction>, input: &str) -> (Outcome, String) {
        let program = Program::new(instrs).unwrap();
        let mut sink = Vec::new();
        let outcome = {
            let mut vm = Vm::new(input, &mut sink);
            vm.run(&program).unwrap()
        };
        (outcome, String::from_utf8(sink).unwrap())
    }

    #[test]
    fn seed_1_empty_program_halts_with_no_output() {
        let (outcome, output) = run(vec![Instruction::bare(Opcode::END)], "bla");
        assert_eq!(outcome, Outcome::Halted);
        assert_eq!(output, "");
    }

    #[test]
    fn seed_2_id_ci_ci_out_end() {
        let (outcome, output) = run(
            vec![
                Instruction::bare(Opcode::ID),
                Instruction::bare(Opcode::CI),
                Instruction::bare(Opcode::CI),
                Instruction::bare(Opcode::OUT),
                Instruction::bare(Opcode::END),
            ],
            "bla",
        );
        assert_eq!(outcome, Outcome::Halted);
        assert_eq!(output, "        blabla\n");
    }

    #[test]
    fn seed_3_gn1_is_stable_and_label_column_applies_once() {
        let (outcome, output) = run(
            vec![
                Instruction::with_string_arg(Opcode::CL, "test1"),
                Instruction::bare(Opcode::OUT),
                Instruction::bare(Opcode::LB),
                Instruction::bare(Opcode::GN1),
                Instruction::bare(Opcode::OUT),
                Instruction::with_string_arg(Opcode::CL, "test2"),
                Instruction::bare(Opcode::OUT),
                Instruction::bare(Opcode::END),
            ],
            "",
        );
        assert_eq!(outcome, Outcome::Halted);
        assert_eq!(output, "        test1\nL0\n        test2\n");
    }

    #[test]
    fn seed_4_adr_jumps_straight_past_before() {
        let (outcome, output) = run(
            vec![
                Instruction::with_label_arg(Opcode::ADR, "START"),
                Instruction::with_string_arg(Opcode::CL, "before"),
                Instruction::with_string_arg(Opcode::CL, "after").labeled("START"),
                Instruction::bare(Opcode::OUT),
                Instruction::bare(Opcode::END),
            ],
            "bla bla2",
        );
        assert_eq!(outcome, Outcome::Halted);
        assert_eq!(output, "        after\n");
    }

    #[test]
    fn seed_5_branch_on_switch() {
        let program = vec![
            Instruction::with_string_arg(Opcode::TST, "correct"),
            Instruction::with_label_arg(Opcode::BT, "OK"),
            Instruction::with_string_arg(Opcode::CL, "failure!"),
            Instruction::with_label_arg(Opcode::B, "OUT_L"),
            Instruction::with_string_arg(Opcode::CL, "success!").labeled("OK"),
            Instruction::bare(Opcode::OUT).labeled("OUT_L"),
            Instruction::bare(Opcode::END),
        ];

        let (outcome, output) = run(program.clone(), "correct bla2");
        assert_eq!(outcome, Outcome::Halted);
        assert_eq!(output, "        success!\n");

        let (outcome, output) = run(program, "invalid bla2");
        assert_eq!(outcome, Outcome::Halted);
        assert_eq!(output, "        failure!\n");
    }

    #[test]
    fn seed_6_call_and_return_resumes_after_cll() {
        let program = vec![
            Instruction::with_label_arg(Opcode::ADR, "MAIN"),
            Instruction::with_string_arg(Opcode::CL, "function").labeled("F"),
            Instruction::bare(Opcode::OUT),
            Instruction::bare(Opcode::R),
            Instruction::with_label_arg(Opcode::CLL, "F").labeled("MAIN"),
            Instruction::with_string_arg(Opcode::CL, "after"),
            Instruction::bare(Opcode::OUT),
            Instruction::bare(Opcode::END),
        ];

        let (outcome, output) = run(program, "correct bla2");
        assert_eq!(outcome, Outcome::Halted);
        assert_eq!(output, "        function\n        after\n");
    }

    #[test]
    fn mandatory_match_failure_halts_in_error() {
        let program = vec![
            Instruction::with_string_arg(Opcode::TST, "x"),
            Instruction::bare(Opcode::BE),
            Instruction::bare(Opcode::END),
        ];

        let (outcome, _) = run(program, "nope");
        assert_eq!(outcome, Outcome::RecognitionError);
    }

    #[test]
    fn call_return_balance_is_restored_after_a_full_run() {
        let program = Program::new(vec![
            Instruction::with_label_arg(Opcode::ADR, "MAIN"),
            Instruction::bare(Opcode::R).labeled("F"),
            Instruction::with_label_arg(Opcode::CLL, "F").labeled("MAIN"),
            Instruction::bare(Opcode::END),
        ])
        .unwrap();

        let mut sink = Vec::new();
        let mut vm = Vm::new("", &mut sink);
        let outcome = vm.run(&program).unwrap();

        assert_eq!(outcome, Outcome::Halted);
        assert_eq!(vm.stack.depth(), 1);
    }
}
