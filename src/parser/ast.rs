//! NC Program Model
//!
//! Words, blocks and whole programs. Every type serializes back to the exact
//! text it was read from through `Display`.

use std::fmt;

use rust_decimal::Decimal;

use crate::value::{Address, ValueData, VariableAddress};

/// The role a program plays in the drilling workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramRole {
    CenterDrilling,
    Drilling,
    Chamfering,
    Reaming,
    Tapping,
    SubProgram,
    CombinedProgram,
}

/// Main-program templates, ordered the way they run on the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MainProgramType {
    CenterDrilling,
    Drilling,
    Chamfering,
    Reaming,
    Tapping,
}

impl MainProgramType {
    pub const ALL: [MainProgramType; 5] = [
        MainProgramType::CenterDrilling,
        MainProgramType::Drilling,
        MainProgramType::Chamfering,
        MainProgramType::Reaming,
        MainProgramType::Tapping,
    ];
}

impl From<MainProgramType> for ProgramRole {
    fn from(kind: MainProgramType) -> Self {
        match kind {
            MainProgramType::CenterDrilling => ProgramRole::CenterDrilling,
            MainProgramType::Drilling => ProgramRole::Drilling,
            MainProgramType::Chamfering => ProgramRole::Chamfering,
            MainProgramType::Reaming => ProgramRole::Reaming,
            MainProgramType::Tapping => ProgramRole::Tapping,
        }
    }
}

impl fmt::Display for MainProgramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MainProgramType::CenterDrilling => "センタードリル",
            MainProgramType::Drilling => "ドリル",
            MainProgramType::Chamfering => "面取り",
            MainProgramType::Reaming => "リーマ",
            MainProgramType::Tapping => "タップ",
        };
        f.write_str(label)
    }
}

/// One lexical unit of an NC line
#[derive(Debug, Clone, PartialEq)]
pub enum Word {
    /// `(text)`, stored without the parentheses
    Comment(String),
    /// `X50.`, `S****`
    Address { address: Address, value: ValueData },
    /// `#100=1.5`
    Variable {
        address: VariableAddress,
        value: ValueData,
    },
}

impl Word {
    pub fn comment_text(&self) -> Option<&str> {
        match self {
            Word::Comment(text) => Some(text),
            _ => None,
        }
    }

    /// Address words still carrying a `*` placeholder
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Word::Address { value, .. } if value.is_indefinite())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Word::Comment(text) => write!(f, "({})", text),
            Word::Address { address, value } => write!(f, "{}{}", address, value),
            Word::Variable { address, value } => write!(f, "#{}={}", address, value),
        }
    }
}

/// Block skip marker: `/` or `/N`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSkip {
    /// A bare `/`, which machines treat as BDT1
    Default,
    /// `/1` through `/9`
    Switch(u8),
}

impl BlockSkip {
    /// The BDT switch this marker is tied to
    pub fn switch_number(&self) -> u8 {
        match self {
            BlockSkip::Default => 1,
            BlockSkip::Switch(n) => *n,
        }
    }
}

impl fmt::Display for BlockSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockSkip::Default => f.write_str("/"),
            BlockSkip::Switch(n) => write!(f, "/{}", n),
        }
    }
}

/// One populated NC line
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub skip: Option<BlockSkip>,
    pub words: Vec<Word>,
}

impl Block {
    pub fn new(words: Vec<Word>) -> Self {
        Self { skip: None, words }
    }

    pub fn comment(text: &str) -> Self {
        Self::new(vec![Word::Comment(text.to_string())])
    }

    pub fn comments(&self) -> impl Iterator<Item = &str> {
        self.words.iter().filter_map(Word::comment_text)
    }

    /// Whether the block holds e.g. `M98` (`letter = 'M'`, `number = 98`)
    pub fn contains_code(&self, letter: char, number: u32) -> bool {
        self.words.iter().any(|word| match word {
            Word::Address { address, value } => {
                address.is(letter)
                    && !value.is_indefinite()
                    && value.number() == Decimal::from(number)
            }
            _ => false,
        })
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(skip) = &self.skip {
            write!(f, "{}", skip)?;
        }
        for word in &self.words {
            write!(f, "{}", word)?;
        }
        Ok(())
    }
}

/// A source line: blank lines are kept so positions survive a round-trip
#[derive(Debug, Clone, PartialEq)]
pub enum BlockLine {
    Blank,
    Populated(Block),
}

impl BlockLine {
    pub fn block(&self) -> Option<&Block> {
        match self {
            BlockLine::Blank => None,
            BlockLine::Populated(block) => Some(block),
        }
    }
}

impl fmt::Display for BlockLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockLine::Blank => Ok(()),
            BlockLine::Populated(block) => write!(f, "{}", block),
        }
    }
}

/// A whole NC program
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramCode {
    pub role: ProgramRole,
    pub name: String,
    pub blocks: Vec<BlockLine>,
}

impl ProgramCode {
    pub fn new(role: ProgramRole, name: impl Into<String>, blocks: Vec<BlockLine>) -> Self {
        Self {
            role,
            name: name.into(),
            blocks,
        }
    }

    /// Populated blocks in source order
    pub fn populated_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter_map(BlockLine::block)
    }

    /// Every comment text in the program
    pub fn comments(&self) -> impl Iterator<Item = &str> {
        self.populated_blocks().flat_map(Block::comments)
    }

    pub fn placeholder_count(&self) -> usize {
        self.populated_blocks()
            .flat_map(|block| block.words.iter())
            .filter(|word| word.is_placeholder())
            .count()
    }
}

impl fmt::Display for ProgramCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, line) in self.blocks.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}
