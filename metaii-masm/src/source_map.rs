/// `source_map[i]` is the 1-based masm source line that produced
/// `instructions[i]`. One masm line always produces exactly one
/// `Instruction`, so (unlike the workspace's register-assembler crate,
/// where one mnemonic can expand into several machine words) this is a
/// plain parallel array rather than a start/count pair.
pub type SourceMap = Vec<u32>;
