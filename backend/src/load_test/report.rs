//! Step results, log capture and report rendering for the load tester.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Local};
use serde::Serialize;

const REPORT_WIDTH: usize = 80;
const RESPONSE_TEXT_LIMIT: usize = 500;

/// Severity of a captured log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        })
    }
}

/// Timestamped log lines kept for the report and mirrored to `tracing`.
#[derive(Debug, Default, Clone)]
pub struct ReportLog {
    lines: Vec<String>,
}

impl ReportLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` as `[HH:MM:SS.mmm] LEVEL: message`.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Warning => tracing::warn!("{message}"),
            LogLevel::Error => tracing::error!("{message}"),
        }
        let stamp = Local::now().format("%H:%M:%S%.3f");
        self.lines.push(format!("[{stamp}] {level}: {message}"));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Record a section banner, titled when `title` is not empty.
    pub fn separator(&mut self, title: &str) {
        self.info(separator_line(title));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

fn separator_line(title: &str) -> String {
    if title.is_empty() {
        return "=".repeat(REPORT_WIDTH);
    }
    let used = title.chars().count() + 5;
    let rule = "=".repeat(REPORT_WIDTH.saturating_sub(used));
    format!("=== {title} {rule}")
}

/// Truncate response text to the first 500 characters, marking the cut.
pub fn truncate_response(text: &str) -> String {
    match text.char_indices().nth(RESPONSE_TEXT_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

/// Outcome of one request in the scenario.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub method: String,
    pub url: String,
    pub description: String,
    pub timestamp: DateTime<Local>,
    pub success: bool,
    pub status_code: Option<u16>,
    pub response_time_ms: f64,
    pub response_text: String,
    pub error: Option<String>,
}

/// Pass and fail counts for one iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IterationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

/// Every step run in one iteration.
#[derive(Debug, Clone, Serialize)]
pub struct IterationReport {
    pub iteration: u32,
    pub start_time: DateTime<Local>,
    pub end_time: Option<DateTime<Local>>,
    pub tests: Vec<StepResult>,
    pub created_course_id: Option<String>,
    pub summary: IterationSummary,
}

impl IterationReport {
    pub fn start(iteration: u32) -> Self {
        Self {
            iteration,
            start_time: Local::now(),
            end_time: None,
            tests: Vec::new(),
            created_course_id: None,
            summary: IterationSummary::default(),
        }
    }

    /// Stamp the end time and compute the summary from the recorded steps.
    pub fn finish(&mut self) {
        let passed = self.tests.iter().filter(|step| step.success).count();
        self.summary = IterationSummary {
            total: self.tests.len(),
            passed,
            failed: self.tests.len() - passed,
        };
        self.end_time = Some(Local::now());
    }
}

/// Cross-iteration comparison of pass counts and per-test outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consistency {
    pub pass_counts: Vec<usize>,
    /// Descriptions of tests that passed in some iterations and failed in others.
    pub inconsistent_tests: Vec<String>,
}

impl Consistency {
    pub fn analyse(iterations: &[IterationReport]) -> Self {
        let pass_counts = iterations
            .iter()
            .map(|iteration| iteration.summary.passed)
            .collect();

        let mut outcomes: BTreeMap<&str, (bool, bool)> = BTreeMap::new();
        for step in iterations.iter().flat_map(|iteration| &iteration.tests) {
            let seen = outcomes.entry(step.description.as_str()).or_default();
            if step.success {
                seen.0 = true;
            } else {
                seen.1 = true;
            }
        }
        let inconsistent_tests = outcomes
            .into_iter()
            .filter(|(_, (passed, failed))| *passed && *failed)
            .map(|(description, _)| description.to_owned())
            .collect();

        Self {
            pass_counts,
            inconsistent_tests,
        }
    }

    /// True when every iteration passed the same number of steps.
    pub fn is_consistent(&self) -> bool {
        self.pass_counts.windows(2).all(|pair| pair[0] == pair[1])
    }
}

/// Results of a whole run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub iterations: Vec<IterationReport>,
}

impl BatchReport {
    pub fn total_tests(&self) -> usize {
        self.iterations.iter().map(|it| it.summary.total).sum()
    }

    pub fn total_passed(&self) -> usize {
        self.iterations.iter().map(|it| it.summary.passed).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.iterations.iter().map(|it| it.summary.failed).sum()
    }

    /// Percentage of passed steps, `None` when nothing ran.
    pub fn success_rate(&self) -> Option<f64> {
        let total = self.total_tests();
        (total > 0).then(|| self.total_passed() as f64 / total as f64 * 100.0)
    }

    pub fn consistency(&self) -> Consistency {
        Consistency::analyse(&self.iterations)
    }
}

/// Render the report file: a header, the captured log and the iteration data.
pub fn render_report(
    log: &ReportLog,
    iterations: &[IterationReport],
    generated_at: DateTime<Local>,
) -> Result<String, serde_json::Error> {
    let rule = "=".repeat(REPORT_WIDTH);
    let mut out = String::new();
    out.push_str("COURSE API LOAD TEST RESULTS\n");
    out.push_str(&format!(
        "Generated: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&rule);
    out.push_str("\n\nSUMMARY:\n");
    for line in log.lines() {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("\n\nDETAILED ITERATION DATA (JSON):\n");
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&serde_json::to_string_pretty(iterations)?);
    out.push('\n');
    Ok(out)
}
