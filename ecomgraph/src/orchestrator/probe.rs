// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Service health probing

use log::{debug, info, warn};
use std::thread;
use std::time::Duration;

use super::error::{OrchestratorError, OrchestratorResult};

/// Reachability check for a service endpoint
pub trait HealthProbe {
    /// `true` when the endpoint answered at all
    fn probe(&self, url: &str) -> bool;
}

/// Plain HTTP GET; any response counts as reachable
#[derive(Debug, Clone)]
pub struct HttpProbe {
    http: reqwest::blocking::Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }
}

impl HealthProbe for HttpProbe {
    fn probe(&self, url: &str) -> bool {
        match self.http.get(url).send() {
            Ok(response) => {
                debug!("Health probe {} answered {}", url, response.status());
                true
            }
            Err(err) => {
                debug!("Health probe {} failed: {}", url, err);
                false
            }
        }
    }
}

/// Where to probe, how often, and how many times
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheckPolicy {
    pub url: String,
    pub retries: u32,
    pub interval: Duration,
}

/// Probe until the service answers or the retry budget is spent
///
/// Returns the number of probes it took. Sleeps `interval` between probes,
/// never after the last one.
pub fn wait_until_ready<P: HealthProbe + ?Sized>(
    probe: &P,
    policy: &HealthCheckPolicy,
) -> OrchestratorResult<u32> {
    let retries = policy.retries.max(1);

    for attempt in 1..=retries {
        if probe.probe(&policy.url) {
            info!("Service at {} is ready", policy.url);
            return Ok(attempt);
        }
        warn!(
            "Service at {} not ready yet ({}/{})",
            policy.url, attempt, retries
        );
        if attempt < retries {
            thread::sleep(policy.interval);
        }
    }

    Err(OrchestratorError::ServiceNotReady {
        url: policy.url.clone(),
        attempts: retries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingProbe {
        ready_after: u32,
        calls: Cell<u32>,
    }

    impl HealthProbe for CountingProbe {
        fn probe(&self, _url: &str) -> bool {
            self.calls.set(self.calls.get() + 1);
            self.calls.get() >= self.ready_after
        }
    }

    fn policy(retries: u32) -> HealthCheckPolicy {
        HealthCheckPolicy {
            url: "http://localhost:8182".to_string(),
            retries,
            interval: Duration::ZERO,
        }
    }

    #[test]
    fn test_ready_on_third_probe() {
        let probe = CountingProbe {
            ready_after: 3,
            calls: Cell::new(0),
        };
        assert_eq!(wait_until_ready(&probe, &policy(5)).unwrap(), 3);
        assert_eq!(probe.calls.get(), 3);
    }

    #[test]
    fn test_never_ready() {
        let probe = CountingProbe {
            ready_after: u32::MAX,
            calls: Cell::new(0),
        };
        let err = wait_until_ready(&probe, &policy(4)).unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::ServiceNotReady { attempts: 4, .. }
        ));
        assert_eq!(probe.calls.get(), 4);
    }
}
