//! The ambient leaf layer: owns one motion per leaf for as long as it is
//! started.

use std::fmt;

use ratatui::buffer::Buffer;

use crate::animations::leaves::{self, LEAVES, LeafMotion, LeafState, Particle};
use crate::viewport::Viewport;

/// Notifications emitted while the layer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafEvent {
    /// A leaf finished its `fall`-th fall (1-based).
    FallCompleted { id: u8, fall: u64 },
}

type Observer = Box<dyn FnMut(LeafEvent)>;

/// Decorative falling leaves. Never interactive.
pub struct AmbientLayer {
    particles: Vec<Particle>,
    motions: Vec<LeafMotion>,
    falls_seen: Vec<u64>,
    /// States from the latest [`frame`](AmbientLayer::frame).
    states: Vec<LeafState>,
    viewport: Option<Viewport>,
    observer: Option<Observer>,
}

impl fmt::Debug for AmbientLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmbientLayer")
            .field("particles", &self.particles.len())
            .field("motions", &self.motions.len())
            .field("viewport", &self.viewport)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Default for AmbientLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AmbientLayer {
    /// A stopped layer over the standard twelve leaves.
    pub fn new() -> Self {
        Self::with_particles(&LEAVES)
    }

    pub fn with_particles(particles: &[Particle]) -> Self {
        Self {
            particles: particles.to_vec(),
            motions: Vec::new(),
            falls_seen: Vec::new(),
            states: Vec::new(),
            viewport: None,
            observer: None,
        }
    }

    /// Receive [`LeafEvent`]s from [`frame`](Self::frame).
    pub fn observe(&mut self, observer: impl FnMut(LeafEvent) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Create and start one motion per leaf, sized for `viewport`.
    pub fn start(&mut self, now_ms: u64, viewport: Viewport) {
        if self.is_running() {
            self.stop();
        }
        self.motions = self
            .particles
            .iter()
            .map(|particle| {
                let mut motion = LeafMotion::new(*particle, viewport.height_px);
                motion.start(now_ms);
                motion
            })
            .collect();
        self.falls_seen = vec![0; self.motions.len()];
        self.states.clear();
        self.viewport = Some(viewport);
        tracing::debug!(
            leaves = self.motions.len(),
            width = viewport.area.width,
            height = viewport.area.height,
            "ambient layer started"
        );
    }

    /// Cancel every leaf. No observer call happens after this returns.
    pub fn stop(&mut self) {
        if self.motions.is_empty() {
            return;
        }
        for motion in &mut self.motions {
            motion.stop();
        }
        tracing::debug!(leaves = self.motions.len(), "ambient layer stopped");
        self.motions.clear();
        self.falls_seen.clear();
        self.states.clear();
        self.viewport = None;
    }

    /// Restart with fresh timelines if the viewport changed size.
    pub fn resize(&mut self, now_ms: u64, viewport: Viewport) {
        if self.viewport.map(|current| current.area) != Some(viewport.area) {
            self.start(now_ms, viewport);
        }
    }

    pub fn is_running(&self) -> bool {
        self.motions.iter().any(LeafMotion::is_running)
    }

    /// Number of leaves currently animating.
    pub fn active_leaves(&self) -> usize {
        self.motions.iter().filter(|m| m.is_running()).count()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Sample every running leaf and report completed falls.
    ///
    /// Drawing does not advance the layer; hosts call this once per update
    /// whether or not the leaves are on screen.
    pub fn frame(&mut self, now_ms: u64) -> &[LeafState] {
        self.states.clear();
        for (motion, seen) in self.motions.iter().zip(self.falls_seen.iter_mut()) {
            let Some(state) = motion.sample(now_ms) else {
                continue;
            };
            self.states.push(state);

            let falls = motion.completed_falls(now_ms).unwrap_or(*seen);
            if falls > *seen {
                *seen = falls;
                if let Some(observer) = self.observer.as_mut() {
                    observer(LeafEvent::FallCompleted {
                        id: motion.particle().id,
                        fall: falls,
                    });
                }
            }
        }
        &self.states
    }

    /// States sampled by the latest [`frame`](Self::frame).
    pub fn states(&self) -> &[LeafState] {
        &self.states
    }

    /// Draw the leaves as of the latest [`frame`](Self::frame).
    pub fn render(&self, buf: &mut Buffer) {
        let Some(viewport) = self.viewport else {
            return;
        };
        leaves::render(buf, &viewport, &self.states);
    }
}
