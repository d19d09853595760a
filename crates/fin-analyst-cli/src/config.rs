use clap::Args;

use fin_analyst_core::{KpiOptions, ValidationMode};

/// Options shared by every KPI command. Each flag can also be set from the
/// environment.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Pair every value with an explanation sentence
    #[arg(long, global = true, env = "FA_EXPLAIN")]
    pub explain: bool,

    /// Also report the alternate formula variants
    #[arg(long, global = true, env = "FA_ALTERNATES")]
    pub alternates: bool,

    /// Round reported values to this many decimal places
    #[arg(long, global = true, env = "FA_ROUND_DP")]
    pub round_dp: Option<u32>,

    /// Input validation: lenient (absent fields are 0) or strict (all fields > 0)
    #[arg(long, global = true, env = "FA_VALIDATION", default_value = "lenient")]
    pub validation: Validation,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum Validation {
    #[default]
    Lenient,
    Strict,
}

impl GlobalOptions {
    pub fn to_kpi_options(&self) -> KpiOptions {
        KpiOptions {
            explain: self.explain,
            include_alternates: self.alternates,
            round_dp: self.round_dp,
            validation: match self.validation {
                Validation::Lenient => ValidationMode::Lenient,
                Validation::Strict => ValidationMode::Strict,
            },
        }
    }
}

/// Options embedded in an input file win over command-line flags.
pub fn merge(flags: &KpiOptions, embedded: Option<KpiOptions>) -> KpiOptions {
    embedded.unwrap_or_else(|| flags.clone())
}
