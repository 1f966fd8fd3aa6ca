//! Suite runner implementation.
//!
//! Executes suites case by case and produces reports.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use harness_domain::{
    CaseReport, CaseState, FailureReason, Fixture, RunReport, Settings, SuiteReport,
};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::case::{Suite, TestCase};
use crate::context::CaseContext;
use crate::ports::HttpClient;

/// Which suites and cases to run, by case-insensitive name substring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Suite name filter.
    pub suite: Option<String>,
    /// Case name filter.
    pub case: Option<String>,
}

impl Selection {
    /// Selects everything.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Returns true if the suite is selected.
    #[must_use]
    pub fn includes_suite(&self, suite: &Suite) -> bool {
        matches_filter(self.suite.as_deref(), suite.name())
    }

    /// Returns true if the case is selected.
    #[must_use]
    pub fn includes_case(&self, case: &TestCase) -> bool {
        matches_filter(self.case.as_deref(), case.name())
    }
}

fn matches_filter(filter: Option<&str>, name: &str) -> bool {
    filter.is_none_or(|f| name.to_lowercase().contains(&f.to_lowercase()))
}

/// Runs suites against one HTTP client.
///
/// Cases within a suite always run one after another in declaration order.
/// Suites run one after another too unless `Settings::parallel` is set, in
/// which case each suite becomes its own task with its own fixture.
#[derive(Clone)]
pub struct SuiteRunner {
    client: Arc<dyn HttpClient>,
    settings: Arc<Settings>,
}

impl SuiteRunner {
    /// Create a new suite runner.
    #[must_use]
    pub fn new(client: Arc<dyn HttpClient>, settings: Settings) -> Self {
        Self {
            client,
            settings: Arc::new(settings),
        }
    }

    /// Returns the settings the runner was built with.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs every selected suite.
    pub async fn run_all(&self, suites: &[Arc<Suite>], selection: &Selection) -> RunReport {
        let started_at = Utc::now();
        let start = Instant::now();
        let selected: Vec<_> = suites
            .iter()
            .filter(|s| selection.includes_suite(s))
            .cloned()
            .collect();

        info!(
            suites = selected.len(),
            parallel = self.settings.parallel,
            base_url = %self.settings.base_url,
            "starting run"
        );

        let reports = if self.settings.parallel {
            self.run_parallel(selected, selection).await
        } else {
            self.run_sequential(selected, selection).await
        };

        let report = RunReport::new(started_at, reports, elapsed_ms(start));
        info!(
            total = report.total(),
            passed = report.passed(),
            failed = report.failed(),
            api_failures = report.api_failures(),
            harness_failures = report.harness_failures(),
            duration_ms = report.duration_ms,
            "run finished"
        );
        report
    }

    async fn run_sequential(
        &self,
        suites: Vec<Arc<Suite>>,
        selection: &Selection,
    ) -> Vec<SuiteReport> {
        let mut reports = Vec::with_capacity(suites.len());
        for suite in suites {
            let name = suite.name().to_string();
            let runner = self.clone();
            let selection = selection.clone();
            // One task at a time: a panicking case ends its suite, not the run.
            let task = tokio::spawn(async move { runner.run_suite(&suite, &selection).await });
            let report = match task.await {
                Ok(report) => report,
                Err(e) => {
                    error!(suite = %name, error = %e, "suite task did not finish");
                    aborted_suite(name)
                }
            };
            reports.push(report);
        }
        reports
    }

    async fn run_parallel(&self, suites: Vec<Arc<Suite>>, selection: &Selection) -> Vec<SuiteReport> {
        let mut tasks = JoinSet::new();
        let mut slots: Vec<Option<SuiteReport>> = Vec::with_capacity(suites.len());
        let mut names = Vec::with_capacity(suites.len());

        for (index, suite) in suites.into_iter().enumerate() {
            slots.push(None);
            names.push(suite.name().to_string());
            let runner = self.clone();
            let selection = selection.clone();
            tasks.spawn(async move { (index, runner.run_suite(&suite, &selection).await) });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, report)) => {
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Some(report);
                    }
                }
                Err(e) => error!(error = %e, "suite task did not finish"),
            }
        }

        // Suites whose task died still show up, as a single aborted case.
        slots
            .into_iter()
            .zip(names)
            .map(|(slot, name)| slot.unwrap_or_else(|| aborted_suite(name)))
            .collect()
    }

    /// Runs one suite with a fresh fixture.
    pub async fn run_suite(&self, suite: &Suite, selection: &Selection) -> SuiteReport {
        let start = Instant::now();
        let mut fixture = Fixture::new();
        let mut cases = Vec::new();

        info!(suite = suite.name(), cases = suite.len(), "running suite");
        for case in suite.cases().iter().filter(|c| selection.includes_case(c)) {
            cases.push(self.run_case(case, &mut fixture).await);
        }

        let report = SuiteReport::new(suite.name(), cases, elapsed_ms(start));
        info!(
            suite = suite.name(),
            passed = report.passed,
            failed = report.failed,
            "suite finished"
        );
        report
    }

    /// Runs one case against the suite fixture.
    pub async fn run_case(&self, case: &TestCase, fixture: &mut Fixture) -> CaseReport {
        let start = Instant::now();
        let setup = case.is_setup();

        if let Some(key) = fixture.first_missing(case.required_keys()) {
            warn!(case = case.name(), key, "skipping request: missing precondition");
            return CaseReport {
                name: case.name().to_string(),
                state: CaseState::failed(FailureReason::MissingPrecondition {
                    key: key.to_string(),
                }),
                setup,
                records: Vec::new(),
                duration_ms: elapsed_ms(start),
            };
        }

        let mode = case.pinned_mode().unwrap_or(self.settings.default_mode);
        info!(case = case.name(), %mode, state = CaseState::Running.label(), "running case");

        let mut ctx = CaseContext::new(
            Arc::clone(&self.client),
            Arc::clone(&self.settings),
            std::mem::take(fixture),
            mode,
        );
        let result = case.call(&mut ctx).await;
        let (returned, records) = ctx.into_parts();
        *fixture = returned;

        let failures: Vec<_> = records.iter().filter(|r| !r.passed).cloned().collect();
        let state = match result {
            Err(e) => CaseState::failed(e.into_reason(failures)),
            Ok(()) if !failures.is_empty() => {
                CaseState::failed(FailureReason::Assertions { failures })
            }
            Ok(()) => match fixture.first_missing(case.provided_keys()) {
                Some(key) => CaseState::failed(FailureReason::FixtureNotProduced {
                    key: key.to_string(),
                }),
                None => CaseState::Passed,
            },
        };

        let report = CaseReport {
            name: case.name().to_string(),
            state,
            setup,
            records,
            duration_ms: elapsed_ms(start),
        };
        match report.reason() {
            None => info!(case = case.name(), duration_ms = report.duration_ms, "case passed"),
            Some(reason) => warn!(
                case = case.name(),
                setup,
                category = reason.category(),
                %reason,
                "case failed"
            ),
        }
        report
    }
}

fn aborted_suite(name: String) -> SuiteReport {
    let case = CaseReport {
        name: "<suite>".to_string(),
        state: CaseState::failed(FailureReason::Aborted {
            message: format!("suite '{name}' did not finish"),
        }),
        setup: false,
        records: Vec::new(),
        duration_ms: 0,
    };
    SuiteReport::new(name, vec![case], 0)
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
