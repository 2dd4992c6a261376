use std::time::Duration;

use rand::Rng;

use crate::config::Throttle;

/// Pauses for the configured delay before a request or download.
pub async fn pause(throttle: &Throttle) {
    let secs = match *throttle {
        Throttle::Delay(secs) => secs,
        Throttle::RandomDelay(max) => rand::thread_rng().gen_range(1.0..=max.max(1.0)),
    };
    if secs > 0.0 {
        tokio::time::sleep(Duration::from_secs_f32(secs)).await;
    }
}
