use std::{net::Ipv4Addr, time::Duration};

use log::{error, info, warn};

use crate::error::MonitorError;

pub trait NetworkLayer {
    fn start(&mut self) -> anyhow::Result<Ipv4Addr>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(8000),
        }
    }
}

impl RetryPolicy {
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_delay.saturating_mul(factor).min(self.max_delay)
    }
}

pub fn bring_up<N: NetworkLayer>(
    network: &mut N,
    policy: &RetryPolicy,
    mut sleep: impl FnMut(Duration),
) -> Result<Ipv4Addr, MonitorError> {
    for attempt in 1..=policy.max_attempts {
        info!("Network bring-up attempt #{attempt}");

        match network.start() {
            Ok(ip) => {
                info!("Network up, IP address: {ip}");
                return Ok(ip);
            }
            Err(e) => {
                warn!("Failed: {e:#}");

                if attempt < policy.max_attempts {
                    let delay = policy.delay_after(attempt);
                    info!("Still connecting, next attempt in {} ms", delay.as_millis());
                    sleep(delay);
                }
            }
        }
    }

    error!("Giving up after {} attempt(s)", policy.max_attempts);
    Err(MonitorError::NetworkUnavailable {
        attempts: policy.max_attempts,
    })
}
