//! Frames-per-second counter and where it is shown.

use instant::{Duration, Instant};
use winit::window::Window;

const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Counts frames and reports the rate once per elapsed second.
#[derive(Debug, Clone)]
pub struct FrameStats {
    frames: u32,
    since: Instant,
}

impl FrameStats {
    pub fn new(now: Instant) -> Self {
        Self { frames: 0, since: now }
    }

    /// Counts one frame. Returns the frame rate when at least a second passed
    /// since the last report.
    pub fn frame(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let elapsed = if now > self.since {
            now - self.since
        } else {
            Duration::ZERO
        };
        if elapsed < REPORT_INTERVAL {
            return None;
        }
        let fps = self.frames as f32 / elapsed.as_secs_f32();
        self.frames = 0;
        self.since = now;
        Some(fps)
    }

    /// Restarts the measurement, e.g. after a pause.
    pub fn reset(&mut self, now: Instant) {
        self.frames = 0;
        self.since = now;
    }
}

pub fn format_fps(fps: f32) -> String {
    format!("{:.0} FPS", fps)
}

/// The on-screen counter: a page element on the web, the window title natively.
#[derive(Debug)]
pub struct StatsOverlay {
    #[cfg(target_arch = "wasm32")]
    element: Option<web_sys::Element>,
    #[cfg(not(target_arch = "wasm32"))]
    title: String,
}

impl StatsOverlay {
    #[cfg(target_arch = "wasm32")]
    pub fn new(element_id: &str, _title: &str) -> Self {
        let element = crate::web::stats_element(element_id);
        if element.is_none() {
            log::warn!("cannot attach the stats element");
        }
        Self { element }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(_element_id: &str, title: &str) -> Self {
        Self {
            title: title.to_string(),
        }
    }

    #[allow(unused_variables)]
    pub fn show(&self, window: &Window, fps: f32) {
        #[cfg(target_arch = "wasm32")]
        if let Some(element) = &self.element {
            element.set_text_content(Some(&format_fps(fps)));
        }
        #[cfg(not(target_arch = "wasm32"))]
        window.set_title(&format!("{} | {}", self.title, format_fps(fps)));
    }
}
