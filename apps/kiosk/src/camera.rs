//! Camera stand-ins for the terminal kiosk.

use std::{path::Path, sync::Arc, time::Duration};

use anyhow::Context;
use async_trait::async_trait;
use futures::{stream, StreamExt};
use kiosk_core::{CameraCapability, CameraError, DecodeEvent, DecodeStream};

/// Frames per second of the QR decode loop.
pub const SCAN_FPS: u64 = 15;

/// Replays payloads from a feed file, one per frame. Blank lines are frames
/// with no code in view. Once the feed runs out the camera stays open and
/// silent.
#[derive(Debug, Clone)]
pub struct FeedCamera {
    frames: Arc<Vec<DecodeEvent>>,
    frame_interval: Duration,
}

impl FeedCamera {
    pub fn new(lines: impl IntoIterator<Item = String>) -> Self {
        let frames = lines
            .into_iter()
            .map(|line| {
                let line = line.trim_end_matches(['\r', '\n']).to_string();
                if line.trim().is_empty() {
                    DecodeEvent::NoCode
                } else {
                    DecodeEvent::Decoded(line)
                }
            })
            .collect();
        Self {
            frames: Arc::new(frames),
            frame_interval: Duration::from_millis(1000 / SCAN_FPS),
        }
    }

    pub async fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read qr feed '{}'", path.display()))?;
        Ok(Self::new(raw.lines().map(str::to_string)))
    }
}

#[async_trait]
impl CameraCapability for FeedCamera {
    async fn open(&self) -> Result<DecodeStream, CameraError> {
        let frames = Arc::clone(&self.frames);
        let interval = self.frame_interval;
        let feed = stream::unfold(0usize, move |index| {
            let frames = Arc::clone(&frames);
            async move {
                let frame = frames.get(index)?.clone();
                tokio::time::sleep(interval).await;
                Some((frame, index + 1))
            }
        });
        Ok(feed.chain(stream::pending()).boxed())
    }
}

/// A camera whose permission prompt is always refused.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeniedCamera;

#[async_trait]
impl CameraCapability for DeniedCamera {
    async fn open(&self) -> Result<DecodeStream, CameraError> {
        Err(CameraError::PermissionDenied)
    }
}
