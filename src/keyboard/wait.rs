//! # Wait For Key Press
//!
//! Async, bounded wait for a key to be pressed.
//!
//! The wait first lets the key go up (so a key that is already held does not
//! count), then waits for it to go down. It samples the source every
//! `poll_interval`, gives up after `timeout`, and stops as soon as the
//! caller's cancellation future resolves.
//!
//! ```no_run
//! use std::time::Duration;
//! use padkit::keyboard::device::EvdevKeyboard;
//! use padkit::keyboard::source::KeyCode;
//! use padkit::keyboard::wait::{wait_for_press, WaitOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut keyboard = EvdevKeyboard::open()?;
//!     let options = WaitOptions {
//!         poll_interval: Duration::from_millis(1),
//!         timeout: Duration::from_secs(10),
//!     };
//!     let cancel = async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     };
//!     wait_for_press(&mut keyboard, KeyCode::ENTER, options, cancel).await?;
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use crate::error::{PadkitError, Result};

use super::source::{KeyCode, KeySource};

/// Sampling and deadline for [`wait_for_press`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Delay between samples. Zero is treated as one millisecond.
    pub poll_interval: Duration,
    /// Give up after this long.
    pub timeout: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Waits until `key` goes from released to pressed on `source`.
///
/// # Errors
///
/// - `Timeout`: no press within `options.timeout`
/// - `Cancelled`: `cancel` resolved first
/// - any error from [`KeySource::refresh`]
pub async fn wait_for_press<S, F>(
    source: &mut S,
    key: KeyCode,
    options: WaitOptions,
    cancel: F,
) -> Result<()>
where
    S: KeySource + ?Sized,
    F: Future<Output = ()>,
{
    debug!("Waiting for key {:?} (timeout {:?})", key, options.timeout);

    tokio::select! {
        outcome = tokio::time::timeout(options.timeout, poll_for_press(source, key, options.poll_interval)) => {
            outcome.map_err(|_| PadkitError::Timeout(options.timeout))?
        }
        _ = cancel => Err(PadkitError::Cancelled),
    }
}

async fn poll_for_press<S>(source: &mut S, key: KeyCode, poll_interval: Duration) -> Result<()>
where
    S: KeySource + ?Sized,
{
    let mut ticker = interval(poll_interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Released first, so a key held on entry does not count
    loop {
        ticker.tick().await;
        source.refresh()?;
        if !source.is_key_down(key) {
            break;
        }
    }

    loop {
        ticker.tick().await;
        source.refresh()?;
        if source.is_key_down(key) {
            debug!("Key {:?} pressed", key);
            return Ok(());
        }
    }
}
