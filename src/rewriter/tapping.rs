use crate::error::NcError;
use crate::parameter::select_parameter;
use crate::parser::ast::{MainProgramType, ProgramCode};
use crate::rewriter::program::pilot_hole_sequence;
use crate::rewriter::{MainProgramRewriter, RewriteByToolArg};

/// Tapping: center drill, pilot drill, optional chamfer, tap
#[derive(Debug, Clone, Copy, Default)]
pub struct TappingProgramRewriter;

impl MainProgramRewriter for TappingProgramRewriter {
    fn rewrite_by_tool(
        &self,
        arg: &RewriteByToolArg<'_>,
    ) -> Result<Vec<ProgramCode>, NcError> {
        let row = select_parameter(&arg.parameters.tapping, arg.directed_diameter)?;
        pilot_hole_sequence(arg, row, row.pilot_hole, MainProgramType::Tapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::MaterialType;
    use crate::rewriter::DrillingMethod;
    use crate::rewriter::test_support::{main_programs, parameters};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn rewrite(diameter: Decimal, material: MaterialType) -> Result<Vec<ProgramCode>, NcError> {
        let main_programs = main_programs();
        let parameters = parameters();
        let arg = RewriteByToolArg {
            main_programs: &main_programs,
            material,
            thickness: dec!(10),
            drilling_method: DrillingMethod::ThroughHole,
            sub_program_number: 8000,
            directed_diameter: diameter,
            parameters: &parameters,
        };
        TappingProgramRewriter.rewrite_by_tool(&arg)
    }

    #[test]
    fn test_m13_3_aluminum_conditions() {
        let programs = rewrite(dec!(13.3), MaterialType::Aluminum).unwrap();

        let names: Vec<_> = programs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["CD", "DR", "TAP"]);

        let tap = programs[2].to_string();
        assert!(tap.contains("M29S700"));
        assert!(tap.contains("F300"));
        assert!(!tap.contains('*'));
        assert!(tap.contains("G98G84R5.Z-11.5F300"));
    }

    #[test]
    fn test_m13_3_iron_conditions() {
        let programs = rewrite(dec!(13.3), MaterialType::Iron).unwrap();
        let tap = programs[2].to_string();
        assert!(tap.contains("M29S350"));
        assert!(tap.contains("F150"));
    }

    #[test]
    fn test_pilot_drill_uses_drilling_row() {
        let programs = rewrite(dec!(10), MaterialType::Aluminum).unwrap();

        let names: Vec<_> = programs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["CD", "DR", "MENTORI", "TAP"]);
        // 10 + tip length of an 8.5 drill
        assert!(programs[1].to_string().contains("Z-14.Q2.F250"));
        assert!(programs[2].to_string().contains("Z-1.2P500F200"));
        assert!(programs[3].to_string().contains("M29S500"));
    }

    #[test]
    fn test_unknown_tap_size() {
        let err = rewrite(dec!(12), MaterialType::Aluminum).unwrap_err();
        assert!(err.is_not_found());
    }
}
