//! Result ledger and run summary
//!
//! Every assertion lands here exactly once. Categories are fixed and print
//! in insertion order; recording prints a one-line colored marker
//! immediately so a watching operator sees progress, and the summary at the
//! end replays per-category tallies plus every recorded error. A run is
//! successful iff no category recorded a failure.

use colored::Colorize;

/// Reporting buckets, in summary order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    BlueprintCrud,
    ContractCrud,
    LifecycleTransitions,
    StatsApi,
}

impl Category {
    /// All categories, in summary order.
    pub const ALL: [Category; 4] = [
        Category::BlueprintCrud,
        Category::ContractCrud,
        Category::LifecycleTransitions,
        Category::StatsApi,
    ];

    /// Heading used in the summary.
    pub fn label(&self) -> &'static str {
        match self {
            Category::BlueprintCrud => "BLUEPRINT CRUD",
            Category::ContractCrud => "CONTRACT CRUD",
            Category::LifecycleTransitions => "LIFECYCLE TRANSITIONS",
            Category::StatsApi => "STATS API",
        }
    }

    fn index(&self) -> usize {
        match self {
            Category::BlueprintCrud => 0,
            Category::ContractCrud => 1,
            Category::LifecycleTransitions => 2,
            Category::StatsApi => 3,
        }
    }
}

/// Pass/fail counters and error log of one category.
#[derive(Debug, Clone, Default)]
pub struct CategoryTally {
    pub passed: u32,
    pub failed: u32,
    pub errors: Vec<String>,
}

/// Ledger of all assertion outcomes in one run.
#[derive(Debug, Default)]
pub struct TestReport {
    tallies: [CategoryTally; 4],
}

impl TestReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one assertion outcome, printing the live marker.
    ///
    /// Returns whether the assertion passed.
    pub fn record(
        &mut self,
        category: Category,
        test: &str,
        outcome: std::result::Result<(), String>,
    ) -> bool {
        let tally = &mut self.tallies[category.index()];
        match outcome {
            Ok(()) => {
                tally.passed += 1;
                println!("{} {}", "✓".green(), test);
                true
            }
            Err(detail) => {
                tally.failed += 1;
                tally.errors.push(format!("{}: {}", test, detail));
                println!("{} {}: {}", "✗".red(), test, detail);
                false
            }
        }
    }

    /// Passed count of one category.
    pub fn passed(&self, category: Category) -> u32 {
        self.tallies[category.index()].passed
    }

    /// Failed count of one category.
    pub fn failed(&self, category: Category) -> u32 {
        self.tallies[category.index()].failed
    }

    /// Recorded error lines of one category.
    pub fn errors(&self, category: Category) -> &[String] {
        &self.tallies[category.index()].errors
    }

    pub fn total_passed(&self) -> u32 {
        self.tallies.iter().map(|t| t.passed).sum()
    }

    pub fn total_failed(&self) -> u32 {
        self.tallies.iter().map(|t| t.failed).sum()
    }

    /// A run succeeds iff nothing failed.
    pub fn is_success(&self) -> bool {
        self.total_failed() == 0
    }

    /// Print per-category tallies, every error, and the overall verdict.
    ///
    /// Returns overall success so callers can derive the exit code.
    pub fn print_summary(&self) -> bool {
        println!("\n{}", "=".repeat(60));
        println!("{}", "TEST SUMMARY".bold());
        println!("{}", "=".repeat(60));

        for category in Category::ALL {
            let tally = &self.tallies[category.index()];
            let verdict = if tally.failed == 0 {
                "PASS".green()
            } else {
                "FAIL".red()
            };
            println!(
                "{}: {} ({} passed, {} failed)",
                category.label(),
                verdict,
                tally.passed,
                tally.failed
            );
            for error in &tally.errors {
                println!("  {} {}", "✗".red(), error);
            }
        }

        println!("{}", "-".repeat(60));
        let verdict = if self.is_success() {
            "ALL TESTS PASSED".green().bold().to_string()
        } else {
            format!("{} TESTS FAILED", self.total_failed()).red().bold().to_string()
        };
        println!(
            "OVERALL: {} ({} passed, {} failed)",
            verdict,
            self.total_passed(),
            self.total_failed()
        );
        println!("{}", "=".repeat(60));

        self.is_success()
    }
}
