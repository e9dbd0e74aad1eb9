//! Evaluator configuration, grounded on the teacher's
//! `runtime/global_context.rs::GlobalContext` — a small bag of knobs handed
//! to the evaluator at construction time rather than threaded through every
//! call or kept as process-global state.

/// Root scope name used when no parent scope exists (spec §4.6).
pub const DEFAULT_ROOT_SCOPE: &str = "cantus";

/// Floor for BigDecimal division precision (spec §4.1: "configurable, >= 50
/// significant digits").
pub const MIN_DIVISION_PRECISION: u32 = 50;

#[derive(Clone, Debug)]
pub struct EvaluatorConfig {
    /// Name of the fixed root scope (spec §4.6).
    pub root_scope_name: String,
    /// Significant digits retained by BigDecimal division (spec §4.1).
    pub division_precision: u32,
    /// Whether the loop-iteration cap (spec §4.5 "Loop limit") is enforced.
    pub loop_limit_enabled: bool,
    /// Maximum loop iterations before an `EvaluatorError::LoopLimitExceeded`
    /// is raised, when `loop_limit_enabled` is set.
    pub max_loop_iterations: u64,
    /// Name bound inside a `catch` body when the script does not specify one
    /// (spec §4.5 "Try/Catch").
    pub default_catch_binding: String,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        EvaluatorConfig {
            root_scope_name: DEFAULT_ROOT_SCOPE.to_string(),
            division_precision: MIN_DIVISION_PRECISION,
            loop_limit_enabled: true,
            max_loop_iterations: 1_000_000,
            default_catch_binding: "error".to_string(),
        }
    }
}

impl EvaluatorConfig {
    pub fn with_division_precision(mut self, precision: u32) -> Self {
        self.division_precision = precision.max(MIN_DIVISION_PRECISION);
        self
    }

    pub fn with_loop_limit(mut self, max_iterations: u64) -> Self {
        self.loop_limit_enabled = true;
        self.max_loop_iterations = max_iterations;
        self
    }

    pub fn without_loop_limit(mut self) -> Self {
        self.loop_limit_enabled = false;
        self
    }
}
