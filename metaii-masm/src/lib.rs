//! Reads masm source text into the instruction stream that
//! [`metaii_vm::program::Program`] is built from.
//!
//! # Masm format
//!
//! Line-oriented. Each non-blank line is one of:
//!
//! - **indented** — an opcode mnemonic, optionally followed by a single
//!   argument: a bare identifier (a label reference) or a single-quoted
//!   string literal (`'…'`; the quotes are stripped, interior quotes are
//!   not escaped — two adjacent `'` inside a literal is not supported);
//! - **unindented** — a label name, which attaches to the next indented
//!   line. Several label lines may stack before the same instruction.
//!
//! Blank (or whitespace-only) lines are ignored wherever they appear.
//!
//! ```rust
//! let instructions = metaii_masm::load(
//!     "START\n        ID\n        CI\n        OUT\n        END\n",
//! )
//! .unwrap();
//! assert_eq!(instructions.len(), 4);
//! assert_eq!(instructions[0].labels, vec!["START".to_owned()]);
//! ```

mod error;
mod loader;
mod source_map;

pub use error::LoaderError;
pub use loader::{load, load_with_source_map};
pub use source_map::SourceMap;
