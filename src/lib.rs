//! # META II Virtual Machine
//!
//! The execution engine for Schorre's META II compiler-writing language.
//! A META II program ("masm") is a syntax-directed translator: it
//! simultaneously recognizes an input language and emits a target-language
//! program as it goes. This crate is the VM that interprets the 18-opcode
//! instruction set those programs compile to.
//!
//! ## Pipeline
//!
//! This crate owns only the core: the [`Instruction`](instruction::Instruction)
//! model, the [`Program`](program::Program) builder, the input
//! [`Scanner`](scanner::Scanner), the [`OutputAssembler`](output::OutputAssembler),
//! the [`ActivationStack`](frame::ActivationStack), and the [`Vm`](vm::Vm)
//! dispatcher itself. Turning masm *text* into a `Vec<Instruction>` is the
//! job of the sibling `metaii-masm` crate; this crate never looks at text.
//!
//! ## Example
//!
//! ```rust
//! use metaii_vm::instruction::Instruction;
//! use metaii_vm::opcode::Opcode;
//! use metaii_vm::program::Program;
//! use metaii_vm::vm::{Outcome, Vm};
//!
//! let program = Program::new(vec![
//!     Instruction::bare(Opcode::ID),
//!     Instruction::bare(Opcode::CI),
//!     Instruction::bare(Opcode::OUT),
//!     Instruction::bare(Opcode::END),
//! ])
//! .unwrap();
//!
//! let mut output = Vec::new();
//! let outcome = Vm::new("hello", &mut output).run(&program).unwrap();
//!
//! assert_eq!(outcome, Outcome::Halted);
//! assert_eq!(output, b"        hello\n");
//! ```

pub mod error;
pub mod frame;
pub mod instruction;
pub mod opcode;
pub mod output;
pub mod program;
pub mod scanner;
pub mod vm;
