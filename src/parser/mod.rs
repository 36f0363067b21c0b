//! NC Program Reader / Writer
//!
//! Turns NC text into a [`ProgramCode`] and back. `%` delimiter lines are
//! dropped on read and never written; everything else round-trips.

pub mod ast;
pub mod lexer;

use std::io::{self, BufRead, Write};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::error::{NcError, ValueError};
use crate::value::{Address, CoordinateValue, NumericalValue, ValueData, VariableAddress};

pub use ast::{Block, BlockLine, BlockSkip, MainProgramType, ProgramCode, ProgramRole, Word};
pub use lexer::{Token, TokenKind, tokenize_line};

static COMMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\((?P<text>[^)]*)\)$").expect("invalid comment regex"));

static VARIABLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?P<address>\d+)=(?P<value>.+)$").expect("invalid variable regex")
});

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<address>[A-Za-z])(?P<value>.+)$").expect("invalid word regex")
});

const PROGRAM_DELIMITER: &str = "%";

/// Failure while reading a program from a stream
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("NCプログラムの読み込みに失敗しました: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Nc(#[from] NcError),
}

/// Read a whole program from a line-oriented stream
pub fn read_all<R: BufRead>(
    reader: R,
    role: ProgramRole,
    program_name: &str,
) -> Result<ProgramCode, ReadError> {
    let mut blocks = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        push_line(&mut blocks, index + 1, &line?)?;
    }
    Ok(ProgramCode::new(role, program_name, blocks))
}

/// Parse a program already held in memory
pub fn parse_program(
    text: &str,
    role: ProgramRole,
    program_name: &str,
) -> Result<ProgramCode, NcError> {
    let mut blocks = Vec::new();
    for (index, line) in text.lines().enumerate() {
        push_line(&mut blocks, index + 1, line)?;
    }
    Ok(ProgramCode::new(role, program_name, blocks))
}

/// Write serialized program text and flush
pub fn write_all<W: Write>(mut writer: W, text: &str) -> io::Result<()> {
    writer.write_all(text.as_bytes())?;
    writer.flush()
}

fn push_line(blocks: &mut Vec<BlockLine>, line_number: usize, line: &str) -> Result<(), NcError> {
    if line.trim_end() == PROGRAM_DELIMITER {
        return Ok(());
    }
    blocks.push(parse_line(line_number, line)?);
    Ok(())
}

/// Parse one line into a block, or a blank when nothing is recognizable
pub fn parse_line(line_number: usize, line: &str) -> Result<BlockLine, NcError> {
    if line.trim().is_empty() {
        return Ok(BlockLine::Blank);
    }

    let (skip, body) = lexer::split_block_skip(line);
    let tokens = lexer::tokenize_line(body);
    if tokens.is_empty() {
        log::warn!(
            "line {}: no NC instruction recognized, kept as a blank line: {:?}",
            line_number,
            line
        );
        return Ok(BlockLine::Blank);
    }

    let skipped = lexer::skipped_text(body, &tokens);
    if !skipped.is_empty() {
        log::warn!(
            "line {}: characters {:?} are not part of any NC word and will not be written back",
            line_number,
            skipped
        );
    }

    let words = tokens
        .iter()
        .map(|token| token_to_word(line_number, token))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BlockLine::Populated(Block { skip, words }))
}

fn token_to_word(line_number: usize, token: &Token) -> Result<Word, NcError> {
    let invalid = |source: ValueError| NcError::InvalidInstruction {
        line: line_number,
        token: token.text.clone(),
        source,
    };

    if let Some(captures) = COMMENT_PATTERN.captures(&token.text) {
        return Ok(Word::Comment(captures["text"].to_string()));
    }

    if let Some(captures) = VARIABLE_PATTERN.captures(&token.text) {
        let address = VariableAddress::new(&captures["address"]).map_err(invalid)?;
        let value = NumericalValue::parse(&captures["value"]).map_err(invalid)?;
        return Ok(Word::Variable {
            address,
            value: ValueData::Numerical(value),
        });
    }

    if let Some(captures) = WORD_PATTERN.captures(&token.text) {
        let letter = captures["address"].chars().next().unwrap_or_default();
        let address = Address::new(letter).map_err(invalid)?;
        let raw = &captures["value"];
        let value = if address.is_coordinate() {
            ValueData::Coordinate(CoordinateValue::parse(raw).map_err(invalid)?)
        } else {
            ValueData::Numerical(NumericalValue::parse(raw).map_err(invalid)?)
        };
        return Ok(Word::Address { address, value });
    }

    Err(NcError::UnexpectedInstruction {
        line: line_number,
        token: token.text.clone(),
    })
}
