use pest::iterators::Pair;
use pest::Parser;

use metaii_vm::instruction::{Argument, Instruction};
use metaii_vm::opcode::{ArgShape, Opcode};
use util::EnumFromStr;

use crate::error::LoaderError;
use crate::source_map::SourceMap;

#[derive(pest_derive::Parser)]
#[grammar = "grammar.pest"]
struct MasmParser;

/// Parses `source` into the instruction stream a [`metaii_vm::program::Program`]
/// is built from. Discards the per-instruction source line numbers; use
/// [`load_with_source_map`] to keep them.
pub fn load(source: &str) -> Result<Vec<Instruction>, LoaderError> {
    load_with_source_map(source).map(|(instructions, _)| instructions)
}

/// As [`load`], but also returns a [`SourceMap`] giving the source line each
/// returned instruction came from.
pub fn load_with_source_map(source: &str) -> Result<(Vec<Instruction>, SourceMap), LoaderError> {
    let mut instructions = Vec::new();
    let mut source_map = SourceMap::new();
    let mut pending_labels: Vec<String> = Vec::new();

    for (index, raw_line) in source.lines().enumerate() {
        let line_no = (index + 1) as u32;

        if raw_line.trim().is_empty() {
            continue;
        }

        let mut parsed = MasmParser::parse(Rule::line, raw_line)
            .map_err(|err| LoaderError::new(line_no, err.to_string()))?;
        let line = parsed
            .next()
            .unwrap()
            .into_inner()
            .next()
            .expect("a non-blank line matches label_line or instruction_line");

        match line.as_rule() {
            Rule::label_line => {
                let name = line.into_inner().next().unwrap().as_str().to_owned();
                pending_labels.push(name);
            }
            Rule::instruction_line => {
                let mut parts = line.into_inner();
                let mnemonic = parts.next().unwrap().as_str();
                let opcode = Opcode::from_str(mnemonic)
                    .map_err(|_| LoaderError::new(line_no, format!("unknown opcode '{}'", mnemonic)))?;
                let arg = build_argument(opcode, parts.next(), line_no)?;

                instructions.push(Instruction::new(
                    opcode,
                    arg,
                    std::mem::take(&mut pending_labels),
                ));
                source_map.push(line_no);
            }
            _ => unreachable!("grammar only produces label_line or instruction_line here"),
        }
    }

    if let Some(label) = pending_labels.first() {
        let last_line = source.lines().count() as u32;
        return Err(LoaderError::new(
            last_line,
            format!("label '{}' does not attach to any instruction", label),
        ));
    }

    Ok((instructions, source_map))
}

fn build_argument(
    opcode: Opcode,
    arg: Option<Pair<Rule>>,
    line_no: u32,
) -> Result<Argument, LoaderError> {
    match (opcode.arg_shape(), arg) {
        (ArgShape::None, None) => Ok(Argument::None),
        (ArgShape::None, Some(_)) => {
            Err(LoaderError::new(line_no, format!("{} takes no argument", opcode)))
        }
        (ArgShape::Label, None) => Err(LoaderError::new(
            line_no,
            format!("{} requires a label argument", opcode),
        )),
        (ArgShape::StringLiteral, None) => Err(LoaderError::new(
            line_no,
            format!("{} requires a string-literal argument", opcode),
        )),
        (ArgShape::Label, Some(arg)) => match arg.into_inner().next().unwrap() {
            pair if pair.as_rule() == Rule::identifier => {
                Ok(Argument::LabelRef(pair.as_str().to_owned()))
            }
            _ => Err(LoaderError::new(
                line_no,
                format!("{} takes a label, not a string literal", opcode),
            )),
        },
        (ArgShape::StringLiteral, Some(arg)) => match arg.into_inner().next().unwrap() {
            pair if pair.as_rule() == Rule::string_literal => {
                let raw = pair.as_str();
                Ok(Argument::StringLiteral(raw[1..raw.len() - 1].to_owned()))
            }
            _ => Err(LoaderError::new(
                line_no,
                format!("{} takes a string literal, not a bare identifier", opcode),
            )),
        },
    }
}
