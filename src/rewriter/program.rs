//! Per-role template rewriting shared by every rewriter

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::NcError;
use crate::parameter::{
    CuttingCondition, DrillingParameter, MainProgramParameter, MaterialType, PilotHole,
    select_parameter,
};
use crate::parser::ast::{BlockLine, MainProgramType, ProgramCode, Word};
use crate::rewriter::{DrillingMethod, RewriteByToolArg};
use crate::value::DrillTipLength;

/// Dwell at the bottom of the hole for `P` words outside a sub-program call
pub const BOTTOM_DWELL: Decimal = dec!(500);

/// Values to put into one template's placeholders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Substitution {
    pub spin: Decimal,
    pub feed: Decimal,
    /// Positive depth; written to `Z` as a negative coordinate
    pub depth: Decimal,
    pub step: Option<Decimal>,
    pub sub_program_number: u32,
}

impl Substitution {
    fn value_for(&self, letter: char, calls_sub_program: bool) -> Option<Decimal> {
        match letter.to_ascii_uppercase() {
            'S' => Some(self.spin),
            'F' => Some(self.feed),
            'Z' => Some(-self.depth),
            'Q' => self.step,
            'P' if calls_sub_program => Some(Decimal::from(self.sub_program_number)),
            'P' => Some(BOTTOM_DWELL),
            _ => None,
        }
    }
}

/// Replace every placeholder the substitution knows about
pub fn rewrite_program(
    template: &ProgramCode,
    substitution: &Substitution,
) -> Result<ProgramCode, NcError> {
    let mut program = template.clone();
    let mut unresolved = Vec::new();

    for line in &mut program.blocks {
        let BlockLine::Populated(block) = line else {
            continue;
        };
        let calls_sub_program = block.contains_code('M', 98);

        for word in &mut block.words {
            let Word::Address { address, value } = word else {
                continue;
            };
            if !value.is_indefinite() {
                continue;
            }
            match substitution.value_for(address.letter(), calls_sub_program) {
                Some(number) => *value = value.with_number(number)?,
                None => unresolved.push(address.letter()),
            }
        }
    }

    if !unresolved.is_empty() {
        log::warn!(
            "{}: placeholders at {:?} have no parameter and were left as-is",
            program.name,
            unresolved
        );
    }

    Ok(program)
}

fn center_drilling_condition(material: MaterialType) -> CuttingCondition {
    match material {
        MaterialType::Aluminum => CuttingCondition::new(dec!(2000), dec!(150)),
        MaterialType::Iron => CuttingCondition::new(dec!(1500), dec!(100)),
    }
}

fn chamfering_condition(material: MaterialType) -> CuttingCondition {
    match material {
        MaterialType::Aluminum => CuttingCondition::new(dec!(1800), dec!(200)),
        MaterialType::Iron => CuttingCondition::new(dec!(1200), dec!(120)),
    }
}

fn rewrite_role(
    arg: &RewriteByToolArg<'_>,
    kind: MainProgramType,
    condition: CuttingCondition,
    depth: Decimal,
    step: Option<Decimal>,
) -> Result<ProgramCode, NcError> {
    let template = arg.template(kind)?;
    let substitution = Substitution {
        spin: condition.spin,
        feed: condition.feed,
        depth,
        step,
        sub_program_number: arg.sub_program_number,
    };
    log::debug!("{} ({}): {:?}", template.name, kind, substitution);
    rewrite_program(template, &substitution)
}

pub(super) fn center_drilling<P: MainProgramParameter>(
    arg: &RewriteByToolArg<'_>,
    row: &P,
) -> Result<ProgramCode, NcError> {
    rewrite_role(
        arg,
        MainProgramType::CenterDrilling,
        center_drilling_condition(arg.material),
        row.center_drill_depth(),
        None,
    )
}

/// `None` when the row has no chamfer
pub(super) fn chamfering<P: MainProgramParameter>(
    arg: &RewriteByToolArg<'_>,
    row: &P,
) -> Result<Option<ProgramCode>, NcError> {
    row.chamfering_depth()
        .map(|depth| {
            rewrite_role(
                arg,
                MainProgramType::Chamfering,
                chamfering_condition(arg.material),
                depth,
                None,
            )
        })
        .transpose()
}

pub(super) fn drilling(
    arg: &RewriteByToolArg<'_>,
    row: &DrillingParameter,
    depth: Decimal,
) -> Result<ProgramCode, NcError> {
    rewrite_role(
        arg,
        MainProgramType::Drilling,
        row.cutting_condition(arg.material),
        depth,
        Some(row.cut_depth),
    )
}

/// Drill one pilot hole with the drilling row covering its diameter
fn pilot_drilling(arg: &RewriteByToolArg<'_>, diameter: Decimal) -> Result<ProgramCode, NcError> {
    let row = select_parameter(&arg.parameters.drilling, diameter)?;
    let depth = match arg.drilling_method {
        DrillingMethod::ThroughHole => arg.thickness + DrillTipLength::new(diameter).value(),
        DrillingMethod::BlindHole { pilot_depth, .. } => pilot_depth,
    };
    drilling(arg, row, depth)
}

/// Ream or tap depth
fn finishing_depth(arg: &RewriteByToolArg<'_>) -> Decimal {
    match arg.drilling_method {
        DrillingMethod::ThroughHole => arg.thickness + DrillTipLength::THROUGH_HOLE_MARGIN,
        DrillingMethod::BlindHole { hole_depth, .. } => hole_depth,
    }
}

/// Center drill, pilot drills, chamfer, then the reamer or tap
pub(super) fn pilot_hole_sequence<P: MainProgramParameter>(
    arg: &RewriteByToolArg<'_>,
    row: &P,
    pilot_hole: PilotHole,
    finishing: MainProgramType,
) -> Result<Vec<ProgramCode>, NcError> {
    let mut programs = vec![center_drilling(arg, row)?];
    for diameter in pilot_hole.diameters() {
        programs.push(pilot_drilling(arg, diameter)?);
    }
    if let Some(program) = chamfering(arg, row)? {
        programs.push(program);
    }
    programs.push(rewrite_role(
        arg,
        finishing,
        row.cutting_condition(arg.material),
        finishing_depth(arg),
        None,
    )?);
    Ok(programs)
}
