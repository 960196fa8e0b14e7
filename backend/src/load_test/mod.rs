//! Batch load tester for the course API.
//!
//! Replays the create, read, update and delete scenario against a running
//! server for a number of iterations, recording status codes and latency for
//! every step, then writes a text report: the log lines followed by the
//! per-iteration data as pretty JSON.
//!
//! The HTTP client sits behind [`ApiTransport`] so the scenario can also be
//! driven against an in-process application.

mod report;
mod runner;
mod transport;

pub use report::{
    BatchReport, Consistency, IterationReport, IterationSummary, LogLevel, ReportLog, StepResult,
    render_report, truncate_response,
};
pub use runner::{LoadTestConfig, LoadTestError, LoadTester};
pub use transport::{ApiTransport, HttpMethod, ReqwestTransport, TransportError, TransportResponse};
