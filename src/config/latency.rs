use std::time::Duration;

/// Artificial delays applied by the services to mimic a remote backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub list: Duration,
    pub get: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
    pub search: Duration,
    pub auth: Duration,
}

impl LatencyProfile {
    pub fn none() -> Self {
        Self {
            list: Duration::ZERO,
            get: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
            search: Duration::ZERO,
            auth: Duration::ZERO,
        }
    }

    pub fn simulated() -> Self {
        Self {
            list: Duration::from_millis(500),
            get: Duration::from_millis(300),
            create: Duration::from_millis(800),
            update: Duration::from_millis(800),
            delete: Duration::from_millis(500),
            search: Duration::from_millis(300),
            auth: Duration::from_millis(1000),
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::none()
    }
}

pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
