use std::net::Ipv4Addr;

use serde::Serialize;

/// A host to run the diagnostic sequence against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeTarget {
    pub hostname: String,
}

impl ProbeTarget {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
        }
    }
}

/// A target whose DNS lookup produced an IPv4 address.
/// Only resolved endpoints take part in the TCP phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub hostname: String,
    pub resolved_address: Ipv4Addr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepKind {
    Dns,
    Tcp,
    HttpRaw,
    HttpsGet,
}

/// Outcome of a single probe step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResult {
    pub step_kind: StepKind,
    pub target: String,
    pub success: bool,
    pub duration_seconds: f64,
    /// Resolved IP, error text or response excerpt, depending on the step.
    pub detail: String,
}

/// Ordered record of every probe run during one invocation.
///
/// Entries can only be appended, so the order always matches execution order.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct ProbeLog {
    entries: Vec<ProbeResult>,
}

impl ProbeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: ProbeResult) {
        self.entries.push(result);
    }

    pub fn entries(&self) -> &[ProbeResult] {
        &self.entries
    }

    pub fn of_kind(&self, kind: StepKind) -> impl Iterator<Item = &ProbeResult> {
        self.entries.iter().filter(move |r| r.step_kind == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
