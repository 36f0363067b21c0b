//! Use cases
//!
//! The steps the CLI strings together: read the sub-program, load the
//! machine's main programs and the parameter tables, rewrite, combine and
//! save. Each step reports a single error type that keeps the domain
//! message intact.

mod edit;
mod main_program;
mod parameter;
mod save;
mod sub_program;

pub use edit::{EditMainProgramError, edit_main_programs};
pub use main_program::{LoadMainProgramError, load_main_programs};
pub use parameter::{LoadParameterError, LoadedParameters, load_parameter_tables};
pub use save::{SaveProgramError, combine_programs, save_program};
pub use sub_program::{
    LoadedSubProgram, ReadSubProgramError, read_sub_program, sub_program_number_from,
};
