//! Concatenation of rewritten main programs into one program

use crate::parser::ast::{Block, BlockLine, ProgramCode, ProgramRole};

/// Separator between the names of concatenated programs
const NAME_SEPARATOR: &str = ">";

/// Join `programs` under a `(<machine>-<material>)` header comment.
///
/// Programs keep their order and are separated by one blank line.
pub fn combine(
    programs: &[ProgramCode],
    machine_tool_label: &str,
    material_label: &str,
) -> ProgramCode {
    let header = Block::comment(&format!("{machine_tool_label}-{material_label}"));
    let mut blocks = vec![BlockLine::Populated(header)];

    for (index, program) in programs.iter().enumerate() {
        if index > 0 {
            blocks.push(BlockLine::Blank);
        }
        blocks.extend(program.blocks.iter().cloned());
    }

    let name = programs
        .iter()
        .map(|program| program.name.as_str())
        .collect::<Vec<_>>()
        .join(NAME_SEPARATOR);

    log::debug!("combined {} programs into '{}'", programs.len(), name);
    ProgramCode::new(ProgramRole::CombinedProgram, name, blocks)
}
