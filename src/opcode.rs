use util::EnumFromStr;
use util_derive::EnumFromStr;

/// The 18 primitive operations of the META II virtual machine.
///
/// Variants are named after the masm mnemonics verbatim (rather than the
/// usual Rust `CamelCase` convention) so that `#[derive(EnumFromStr)]` can
/// match a parsed mnemonic straight to a variant without a translation
/// table.
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumFromStr)]
#[allow(non_camel_case_types)]
pub enum Opcode {
    // Recognizers — consume input, set `switch`.
    TST,
    ID,
    NUM,
    SR,

    // Control flow.
    CLL,
    R,
    SET,
    B,
    BT,
    BF,
    BE,

    // Output assembly.
    CL,
    CI,
    GN1,
    GN2,
    LB,
    OUT,

    // Meta / pseudo.
    ADR,
    END,
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// The shape an opcode's argument must take, checked by the masm loader
/// before the VM ever sees an [`Instruction`](crate::instruction::Instruction).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ArgShape {
    None,
    Label,
    StringLiteral,
}

impl Opcode {
    pub fn arg_shape(self) -> ArgShape {
        match self {
            Opcode::TST | Opcode::CL => ArgShape::StringLiteral,
            Opcode::CLL | Opcode::B | Opcode::BT | Opcode::BF | Opcode::ADR => ArgShape::Label,
            Opcode::ID
            | Opcode::NUM
            | Opcode::SR
            | Opcode::R
            | Opcode::SET
            | Opcode::BE
            | Opcode::CI
            | Opcode::GN1
            | Opcode::GN2
            | Opcode::LB
            | Opcode::OUT
            | Opcode::END => ArgShape::None,
        }
    }
}
