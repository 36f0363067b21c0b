//! Domain Errors
//!
//! Everything that can go wrong while parsing, classifying or rewriting an
//! NC program. Messages are shown to the operator as-is.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::parser::ast::MainProgramType;

/// Errors raised while building value objects from raw tokens
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("アドレスはアルファベット1文字で指定してください: '{0}'")]
    InvalidAddress(char),

    #[error("変数アドレスは数字で指定してください: '{0}'")]
    InvalidVariableAddress(String),

    #[error("値に '*' とそれ以外の文字が混在しています: '{0}'")]
    MixedIndefinite(String),

    #[error("値に使用できない文字が含まれています: '{0}'")]
    OutOfRange(String),

    #[error("数値として解釈できません: '{0}'")]
    NotNumeric(String),
}

/// The domain error family
///
/// Use cases catch this family as a whole and rewrap it, so library callers
/// only see one error type per use case.
#[derive(Debug, Error)]
pub enum NcError {
    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("{line}行目: 想定外のNC命令です '{token}'")]
    UnexpectedInstruction { line: usize, token: String },

    #[error("{line}行目: '{token}' {source}")]
    InvalidInstruction {
        line: usize,
        token: String,
        #[source]
        source: ValueError,
    },

    #[error("作業指示が見つかりません")]
    DirectedOperationNotFound,

    #[error("作業指示が{0}件見つかりました 作業指示は1件のみにしてください")]
    MultipleDirectedOperations(usize),

    #[error("作業指示から工具径が見つかりません")]
    DirectedOperationToolDiameterNotFound,

    #[error("作業指示から工具径が{0}件見つかりました 工具径は1件のみにしてください")]
    MultipleToolDiameters(usize),

    #[error("ドリルサイズ '{0}' がドリルサイズ表に見つかりません")]
    DrillSizeNotFound(String),

    #[error("ドリルサイズ表のデータが不正です: {0}")]
    InvalidDrillSizeData(String),

    #[error("パラメータ表の工具径 '{0}' が不正です")]
    InvalidDiameterKey(String),

    #[error("パラメータ表の形式が不正です: {0}")]
    InvalidParameterTable(String),

    #[error("{operation}のパラメータ表に工具径 {diameter} のパラメータが見つかりません")]
    ParameterNotFound {
        operation: &'static str,
        diameter: Decimal,
    },

    #[error("作業指示({operation})とリーマの種類の組み合わせが不正です")]
    InconsistentReamer { operation: &'static str },

    #[error("{0}のメインプログラムが見つかりません")]
    MainProgramNotFound(MainProgramType),

    #[error("板厚は0より大きい値を指定してください: {0}")]
    InvalidThickness(Decimal),
}

impl NcError {
    /// Lookup misses: the requested key simply isn't in a table
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            NcError::DirectedOperationNotFound
                | NcError::DirectedOperationToolDiameterNotFound
                | NcError::DrillSizeNotFound(_)
                | NcError::ParameterNotFound { .. }
                | NcError::MainProgramNotFound(_)
        )
    }
}
