//! Error taxonomy for the Cantus runtime (spec §7), grounded on the
//! teacher's `runtime/execution/errors.rs` style: hand-written `Display`
//! impls per error kind, composed through explicit `From` impls rather than
//! a derive macro, with `thiserror` reserved for the one boundary-facing
//! error type (`LoadError`) the same way the teacher reserves `thiserror`
//! for its `network/com_interfaces` leaf errors.

use std::fmt;

/// A 1-based line number within the evaluated text (spec §7: "Errors carry
/// a line number").
pub type Line = usize;

/// Ill-formed expression/statement, mismatched brackets, invalid lambda.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxError {
    UnmatchedBracket { open: String },
    UnexpectedToken { found: String },
    UnexpectedEndOfInput,
    InvalidNumberLiteral(String),
    InvalidLambdaLiteral(String),
    UnterminatedString,
    UnknownOperatorSign(String),
    DeferWithNoLowerBinding { sign: String },
    InvalidIndentation,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::UnmatchedBracket { open } => {
                write!(f, "unmatched bracket '{open}'")
            }
            SyntaxError::UnexpectedToken { found } => {
                write!(f, "unexpected token '{found}'")
            }
            SyntaxError::UnexpectedEndOfInput => {
                write!(f, "unexpected end of input")
            }
            SyntaxError::InvalidNumberLiteral(text) => {
                write!(f, "invalid number literal '{text}'")
            }
            SyntaxError::InvalidLambdaLiteral(text) => {
                write!(f, "invalid lambda literal '{text}'")
            }
            SyntaxError::UnterminatedString => {
                write!(f, "unterminated string literal")
            }
            SyntaxError::UnknownOperatorSign(sign) => {
                write!(f, "unknown operator sign '{sign}'")
            }
            SyntaxError::DeferWithNoLowerBinding { sign } => {
                write!(
                    f,
                    "operator '{sign}' deferred but no lower-precedence binding exists"
                )
            }
            SyntaxError::InvalidIndentation => {
                write!(f, "inconsistent indentation")
            }
        }
    }
}

/// Domain violations: non-square determinant, cross of non-R3 vectors,
/// division by zero, and similar numeric domain errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MathError {
    DivisionByZero,
    NonSquareMatrix,
    CrossProductRequiresR3,
    IncompatibleMatrixDimensions { lhs: (usize, usize), rhs: (usize, usize) },
    Undefined,
    StepCannotBeZero,
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::DivisionByZero => write!(f, "division by zero"),
            MathError::NonSquareMatrix => {
                write!(f, "operation requires a square matrix")
            }
            MathError::CrossProductRequiresR3 => {
                write!(f, "cross product is only defined for column vectors in R3")
            }
            MathError::IncompatibleMatrixDimensions { lhs, rhs } => write!(
                f,
                "incompatible matrix dimensions {}x{} and {}x{}",
                lhs.0, lhs.1, rhs.0, rhs.1
            ),
            MathError::Undefined => write!(f, "result is undefined"),
            MathError::StepCannotBeZero => {
                write!(f, "for-to-step step must not be zero")
            }
        }
    }
}

/// Undefined identifier, wrong arity, index out of range, disposed class
/// instance, narrowing cast without `unsafecast`, loop-limit exceeded,
/// import/load failure, and user-raised script errors.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluatorError {
    UndefinedIdentifier(String),
    WrongArity { expected: usize, found: usize },
    IndexOutOfRange { index: i64, len: usize },
    DisposedClassInstance(String),
    NarrowingCastWithoutUnsafecast,
    LoopLimitExceeded(u64),
    ImportFailed(String),
    LoadFailed(String),
    /// Message constructed by script and surfaced as an Evaluator error.
    UserRaised(String),
    PrivateVariable(String),
    DuplicateDefinition(String),
    ReturnOutsideFunction,
    BreakOutsideLoop,
    ContinueOutsideLoop,
    /// Raised by `Reference::resolve` when following a reference chain
    /// exceeds the bounded depth guard (spec §9: legal operations never
    /// produce cycles, but resolution still defends against one).
    ReferenceCycle,
}

impl fmt::Display for EvaluatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluatorError::UndefinedIdentifier(name) => {
                write!(f, "undefined identifier '{name}'")
            }
            EvaluatorError::WrongArity { expected, found } => write!(
                f,
                "wrong number of arguments: expected {expected}, found {found}"
            ),
            EvaluatorError::IndexOutOfRange { index, len } => write!(
                f,
                "index {index} out of range for length {len}"
            ),
            EvaluatorError::DisposedClassInstance(name) => {
                write!(f, "instance of '{name}' has been disposed")
            }
            EvaluatorError::NarrowingCastWithoutUnsafecast => write!(
                f,
                "narrowing cast requires 'unsafecast'"
            ),
            EvaluatorError::LoopLimitExceeded(max) => {
                write!(f, "loop exceeded the configured limit of {max} iterations")
            }
            EvaluatorError::ImportFailed(scope) => {
                write!(f, "failed to import scope '{scope}'")
            }
            EvaluatorError::LoadFailed(path) => {
                write!(f, "failed to load package '{path}'")
            }
            EvaluatorError::UserRaised(message) => write!(f, "{message}"),
            EvaluatorError::PrivateVariable(name) => {
                write!(f, "'{name}' is private to its defining scope")
            }
            EvaluatorError::DuplicateDefinition(name) => {
                write!(f, "'{name}' is already defined in this scope")
            }
            EvaluatorError::ReturnOutsideFunction => {
                write!(f, "'return' used outside of a function")
            }
            EvaluatorError::BreakOutsideLoop => {
                write!(f, "'break' used outside of a loop")
            }
            EvaluatorError::ContinueOutsideLoop => {
                write!(f, "'continue' used outside of a loop")
            }
            EvaluatorError::ReferenceCycle => {
                write!(f, "reference chain exceeded the maximum resolution depth")
            }
        }
    }
}

/// Top-level error type returned by every fallible operation in this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct CantusError {
    pub kind: ErrorKind,
    /// 1-based line number within the evaluated text, when known.
    pub line: Option<Line>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    Syntax(SyntaxError),
    Math(MathError),
    Evaluator(EvaluatorError),
}

impl CantusError {
    pub fn at_line(mut self, line: Line) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for CantusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.line {
            Some(line) => write!(f, "line {line}: {}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Syntax(e) => write!(f, "syntax error: {e}"),
            ErrorKind::Math(e) => write!(f, "math error: {e}"),
            ErrorKind::Evaluator(e) => write!(f, "evaluator error: {e}"),
        }
    }
}

impl std::error::Error for CantusError {}

impl From<SyntaxError> for CantusError {
    fn from(error: SyntaxError) -> Self {
        CantusError { kind: ErrorKind::Syntax(error), line: None }
    }
}

impl From<MathError> for CantusError {
    fn from(error: MathError) -> Self {
        CantusError { kind: ErrorKind::Math(error), line: None }
    }
}

impl From<EvaluatorError> for CantusError {
    fn from(error: EvaluatorError) -> Self {
        CantusError { kind: ErrorKind::Evaluator(error), line: None }
    }
}

/// Boundary-facing error for `load` (spec §6), the one place this crate
/// reaches for `thiserror`, mirroring the teacher's use of it in
/// `network/com_interfaces/*`.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read package file '{path}': {source}")]
    Io { path: String, #[source] source: std::io::Error },
    #[error("package '{0}' evaluation failed")]
    Evaluation(String),
}

impl From<LoadError> for CantusError {
    fn from(error: LoadError) -> Self {
        match error {
            LoadError::Io { path, .. } => {
                EvaluatorError::LoadFailed(path).into()
            }
            LoadError::Evaluation(path) => EvaluatorError::LoadFailed(path).into(),
        }
    }
}
