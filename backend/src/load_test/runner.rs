//! Scenario driver for the course API load test.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use cap_std::{ambient_authority, fs::Dir};
use chrono::{DateTime, Local};
use serde_json::{Value, json};
use thiserror::Error;

use super::report::{
    BatchReport, IterationReport, ReportLog, StepResult, render_report, truncate_response,
};
use super::transport::{ApiTransport, HttpMethod, TransportResponse};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DUPLICATE_COURSE_NAME: &str = "Duplicate Test Course";

const LIST_INITIAL: &str = "Get all courses (initial)";
const CREATE: &str = "Create new course";
const LIST_AFTER_CREATE: &str = "Get all courses (after create)";
const GET_BY_ID: &str = "Get course by ID";
const UPDATE: &str = "Update course";
const DELETE: &str = "Delete course";
const LIST_AFTER_DELETE: &str = "Get all courses (after delete)";
const GET_INVALID_ID: &str = "Get course with invalid ID";
const CREATE_INVALID: &str = "Create course with invalid data";
const CREATE_FOR_DUPLICATE: &str = "Create course for duplicate test";
const CREATE_DUPLICATE: &str = "Create duplicate course";
const CLEANUP_DUPLICATE: &str = "Cleanup duplicate test course";

/// Run parameters.
#[derive(Debug, Clone)]
pub struct LoadTestConfig {
    /// Collection URL, for example `http://localhost:8080/api/courses`.
    pub base_url: String,
    pub iterations: u32,
    /// Pause between iterations.
    pub delay: Duration,
    /// Report destination; no file is written when unset.
    pub output: Option<PathBuf>,
}

/// Failures that stop a run.
#[derive(Debug, Error)]
pub enum LoadTestError {
    #[error("cannot reach API at {url}: {message}")]
    Unreachable { url: String, message: String },
}

/// One request of the scenario.
struct Step<'a> {
    method: HttpMethod,
    url: String,
    description: &'a str,
    expected_status: u16,
    body: Option<Value>,
}

impl<'a> Step<'a> {
    fn new(method: HttpMethod, url: String, description: &'a str, expected: u16) -> Self {
        Self {
            method,
            url,
            description,
            expected_status: expected,
            body: None,
        }
    }

    fn get(url: impl Into<String>, description: &'a str, expected: u16) -> Self {
        Self::new(HttpMethod::Get, url.into(), description, expected)
    }

    fn delete(url: impl Into<String>, description: &'a str, expected: u16) -> Self {
        Self::new(HttpMethod::Delete, url.into(), description, expected)
    }

    fn post(url: impl Into<String>, description: &'a str, expected: u16, body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::new(HttpMethod::Post, url.into(), description, expected)
        }
    }

    fn put(url: impl Into<String>, description: &'a str, expected: u16, body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::new(HttpMethod::Put, url.into(), description, expected)
        }
    }
}

/// Replays the course scenario through an [`ApiTransport`].
pub struct LoadTester<T> {
    transport: T,
    config: LoadTestConfig,
    log: ReportLog,
}

impl<T: ApiTransport> LoadTester<T> {
    pub fn new(transport: T, config: LoadTestConfig) -> Self {
        Self {
            transport,
            config,
            log: ReportLog::new(),
        }
    }

    /// Log lines captured so far.
    pub fn log(&self) -> &ReportLog {
        &self.log
    }

    fn collection_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{id}", self.collection_url())
    }

    /// Probe the API, run every iteration, then summarise and save the report.
    ///
    /// Only an unreachable API fails the run. A report that cannot be saved
    /// is logged and the results are still returned.
    pub async fn run(&mut self) -> Result<BatchReport, LoadTestError> {
        let started = Local::now();
        self.log_header(started);
        self.check_connection().await?;

        let mut iterations = Vec::new();
        for number in 1..=self.config.iterations {
            iterations.push(self.run_iteration(number).await);
            if number < self.config.iterations && !self.config.delay.is_zero() {
                let pause = self.config.delay.as_secs_f64();
                let line = format!("Waiting {pause}s before next iteration...");
                self.log.info(line);
                tokio::time::sleep(self.config.delay).await;
            }
        }

        let batch = BatchReport { iterations };
        self.summarise(&batch, started);
        if let Some(path) = self.config.output.clone() {
            self.save_report(&path, &batch);
        }
        Ok(batch)
    }

    fn log_header(&mut self, started: DateTime<Local>) {
        let lines = [
            format!("Version: {}", env!("CARGO_PKG_VERSION")),
            format!("Start time: {}", started.format(TIMESTAMP_FORMAT)),
            format!("Iterations: {}", self.config.iterations),
            format!("Target URL: {}", self.config.base_url),
            format!("Delay between iterations: {:?}", self.config.delay),
        ];
        let log = &mut self.log;
        log.separator("COURSE API LOAD TEST STARTED");
        for line in lines {
            log.info(line);
        }
        log.separator("");
    }

    async fn check_connection(&mut self) -> Result<(), LoadTestError> {
        self.log.separator("INITIAL CONNECTION TEST");
        let url = self.collection_url().to_owned();
        let outcome = self.transport.send(HttpMethod::Get, &url, None).await;
        let log = &mut self.log;
        match outcome {
            Ok(response) => {
                let status = response.status;
                log.info(format!("Connected to API at {url} (status {status})"));
                Ok(())
            }
            Err(err) => {
                log.error(format!("Cannot connect to API at {url}: {err}"));
                log.error("Make sure the course service is running");
                let message = err.to_string();
                Err(LoadTestError::Unreachable { url, message })
            }
        }
    }

    async fn execute(
        &mut self,
        iteration: &mut IterationReport,
        step: Step<'_>,
    ) -> Option<TransportResponse> {
        let Step {
            method,
            url,
            description,
            expected_status,
            body,
        } = step;
        let timestamp = Local::now();
        let started = Instant::now();
        let outcome = self.transport.send(method, &url, body.as_ref()).await;
        let ms = started.elapsed().as_secs_f64() * 1000.0;
        let request = format!("{} {url}", method.as_str());

        let mut result = StepResult {
            method: method.as_str().to_owned(),
            url,
            description: description.to_owned(),
            timestamp,
            success: false,
            status_code: None,
            response_time_ms: ms,
            response_text: String::new(),
            error: None,
        };
        let log = &mut self.log;
        let response = match outcome {
            Ok(response) => {
                let status = response.status;
                result.success = status == expected_status;
                result.status_code = Some(status);
                result.response_text = truncate_response(&response.body);
                let line = format!("{description} - {request} -> {status} ({ms:.2} ms)");
                if result.success {
                    log.info(format!("PASS: {line}"));
                } else {
                    log.error(format!("FAIL: {line}, expected {expected_status}"));
                    log.error(format!("Response: {}", result.response_text));
                }
                Some(response)
            }
            Err(err) => {
                log.error(format!("FAIL: {description} - {request} -> {err}"));
                result.error = Some(err.to_string());
                None
            }
        };
        iteration.tests.push(result);
        response
    }

    async fn run_iteration(&mut self, number: u32) -> IterationReport {
        let mut iteration = IterationReport::start(number);
        self.log.separator(&format!("ITERATION {number}"));
        let collection = self.collection_url().to_owned();
        let now = Local::now().to_rfc3339();

        let step = Step::get(&collection, LIST_INITIAL, 200);
        let initial = self.execute(&mut iteration, step).await;
        let initial_courses = course_list(initial.as_ref()).unwrap_or_default();
        let count = initial_courses.len();
        self.log.info(format!("Initial courses count: {count}"));

        let body = json!({
            "name": format!("Test Course {number}"),
            "syllabus": format!("Test syllabus for iteration {number} created at {now}"),
        });
        let step = Step::post(&collection, CREATE, 201, body);
        let created = self.execute(&mut iteration, step).await;
        let created_id = string_field(created.as_ref(), "id");
        if let Some(id) = &created_id {
            self.log.info(format!("Created course ID: {id}"));
        }
        iteration.created_course_id = created_id.clone();

        let step = Step::get(&collection, LIST_AFTER_CREATE, 200);
        let listed = self.execute(&mut iteration, step).await;
        self.check_count(listed.as_ref(), count + 1, "creation");

        if let Some(id) = &created_id {
            let url = self.item_url(id);
            let step = Step::get(&url, GET_BY_ID, 200);
            self.execute(&mut iteration, step).await;

            let body = json!({
                "name": format!("Updated Course {number}"),
                "syllabus": format!("Updated syllabus for iteration {number} at {now}"),
            });
            let step = Step::put(&url, UPDATE, 200, body);
            self.execute(&mut iteration, step).await;

            let step = Step::delete(&url, DELETE, 200);
            self.execute(&mut iteration, step).await;
        } else {
            let note = "No course ID captured; skipping get, update and delete";
            self.log.warning(note);
        }

        let step = Step::get(&collection, LIST_AFTER_DELETE, 200);
        let listed = self.execute(&mut iteration, step).await;
        self.check_count(listed.as_ref(), count, "deletion");

        let step = Step::get(self.item_url("invalid_id"), GET_INVALID_ID, 400);
        self.execute(&mut iteration, step).await;

        let body = json!({ "name": "AB" });
        let step = Step::post(&collection, CREATE_INVALID, 400, body);
        self.execute(&mut iteration, step).await;

        let existing = first_course_name(&initial_courses);
        self.check_duplicates(&mut iteration, existing).await;

        iteration.finish();
        let summary = iteration.summary;
        let (passed, total, failed) = (summary.passed, summary.total, summary.failed);
        let line = format!("Iteration {number} Summary: {passed}/{total} passed");
        self.log.info(format!("{line}, {failed} failed"));
        iteration
    }

    /// Expect 409 for a repeated name, using an existing course when there is
    /// one and a throwaway course otherwise.
    async fn check_duplicates(&mut self, iteration: &mut IterationReport, name: Option<String>) {
        let collection = self.collection_url().to_owned();
        if let Some(name) = name {
            let body = json!({ "name": name, "syllabus": "Duplicate test syllabus" });
            let step = Step::post(&collection, CREATE_DUPLICATE, 409, body);
            self.execute(iteration, step).await;
            return;
        }

        let body = json!({
            "name": DUPLICATE_COURSE_NAME,
            "syllabus": "Syllabus for duplicate test",
        });
        let step = Step::post(&collection, CREATE_FOR_DUPLICATE, 201, body.clone());
        let first = self.execute(iteration, step).await;
        let step = Step::post(&collection, CREATE_DUPLICATE, 409, body);
        self.execute(iteration, step).await;

        match string_field(first.as_ref(), "id") {
            Some(id) => {
                let step = Step::delete(self.item_url(&id), CLEANUP_DUPLICATE, 200);
                self.execute(iteration, step).await;
            }
            None => {
                let note = "Duplicate test course was not created; nothing to clean up";
                self.log.warning(note);
            }
        }
    }

    fn check_count(&mut self, listed: Option<&TransportResponse>, expected: usize, stage: &str) {
        let Some(count) = course_list(listed).map(|courses| courses.len()) else {
            return;
        };
        let log = &mut self.log;
        if count == expected {
            log.info(format!("Course count after {stage}: {count}"));
        } else {
            let line = format!("Course count after {stage} is {count}");
            log.warning(format!("{line}, expected {expected}"));
        }
    }

    fn summarise(&mut self, batch: &BatchReport, started: DateTime<Local>) {
        let finished = Local::now();
        let elapsed = (finished - started).num_milliseconds() as f64 / 1000.0;
        let rate = match batch.success_rate() {
            Some(rate) => format!("{rate:.1}%"),
            None => "N/A".to_owned(),
        };
        let lines = [
            format!("End time: {}", finished.format(TIMESTAMP_FORMAT)),
            format!("Total duration: {elapsed:.2}s"),
            format!("Iterations completed: {}", batch.iterations.len()),
            format!("Total tests: {}", batch.total_tests()),
            format!("Total passed: {}", batch.total_passed()),
            format!("Total failed: {}", batch.total_failed()),
            format!("Success rate: {rate}"),
        ];
        let log = &mut self.log;
        log.separator("FINAL SUMMARY");
        for line in lines {
            log.info(line);
        }

        if batch.iterations.len() < 2 {
            return;
        }
        let consistency = batch.consistency();
        let pass_counts = &consistency.pass_counts;
        let counts: Vec<String> = pass_counts.iter().map(ToString::to_string).collect();
        log.separator("CONSISTENCY ANALYSIS");
        let counts = counts.join(", ");
        log.info(format!("Passed tests per iteration: [{counts}]"));
        if consistency.is_consistent() {
            log.info("All iterations passed the same number of tests");
        } else {
            log.warning("Pass counts differ between iterations");
        }
        if consistency.inconsistent_tests.is_empty() {
            log.info("Every test behaved the same in all iterations");
        } else {
            let names = consistency.inconsistent_tests.join(", ");
            log.warning(format!("Inconsistent tests: {names}"));
        }
    }

    fn save_report(&mut self, path: &Path, batch: &BatchReport) {
        let written = render_report(&self.log, &batch.iterations, Local::now())
            .map_err(io::Error::other)
            .and_then(|report| write_report(path, &report));
        match written {
            Ok(()) => {
                let line = format!("Detailed results saved to: {}", path.display());
                self.log.info(line);
            }
            Err(err) => {
                let line = format!("Failed to save results to file: {err}");
                self.log.error(line);
            }
        }
    }
}

fn course_list(response: Option<&TransportResponse>) -> Option<Vec<Value>> {
    serde_json::from_str(&response?.body).ok()
}

fn string_field(response: Option<&TransportResponse>, name: &str) -> Option<String> {
    let value: Value = serde_json::from_str(&response?.body).ok()?;
    value.get(name)?.as_str().map(str::to_owned)
}

fn first_course_name(courses: &[Value]) -> Option<String> {
    let name = courses.first()?.get("name")?.as_str()?;
    Some(name.to_owned())
}

fn write_report(path: &Path, contents: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "report path must include a file name",
        )
    })?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
    directory.write(file_name, contents.as_bytes())
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
