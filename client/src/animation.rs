//! Time-based motion for the map overlays.
//!
//! Everything here is a pure function of timestamps in milliseconds (the
//! `performance.now()` timebase), so the overlays can bind attributes straight
//! to the animation clock signal.

pub const HIGHLIGHT_FADE_MS: f64 = 200.0;
pub const TOOLTIP_FADE_MS: f64 = 150.0;

pub const RETICLE_STIFFNESS: f64 = 300.0;
pub const RETICLE_DAMPING: f64 = 25.0;
pub const OUTER_RING_PERIOD_MS: f64 = 8_000.0;
pub const INNER_RING_PERIOD_MS: f64 = 6_000.0;

pub const SCAN_SWEEP_MS: f64 = 4_000.0;
pub const SCAN_REPEAT_DELAY_MS: f64 = 2_000.0;
const SCAN_OVERSHOOT: f64 = 20.0;

/// Frames longer than this (background tab, debugger) are treated as this long.
const MAX_FRAME_SECS: f64 = 0.064;
const SPRING_SUBSTEP_SECS: f64 = 1.0 / 240.0;
const SPRING_REST_DELTA: f64 = 0.001;

/// Cubic ease-out: decelerating to zero velocity.
pub fn cubic_ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) - 1.0;
    t * t * t + 1.0
}

/// Fraction of `duration_ms` elapsed since `start_ms`, clamped to `0..=1`.
pub fn progress(now_ms: f64, start_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    ((now_ms - start_ms) / duration_ms).clamp(0.0, 1.0)
}

/// Position within a repeating cycle, in `0..1`.
pub fn loop_phase(now_ms: f64, period_ms: f64) -> f64 {
    if period_ms <= 0.0 {
        return 0.0;
    }
    now_ms.rem_euclid(period_ms) / period_ms
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    Clockwise,
    CounterClockwise,
}

/// Rotation in degrees of a ring turning once per `period_ms`.
pub fn ring_rotation(now_ms: f64, period_ms: f64, spin: Spin) -> f64 {
    let degrees = loop_phase(now_ms, period_ms) * 360.0;
    match spin {
        Spin::Clockwise => degrees,
        Spin::CounterClockwise => -degrees,
    }
}

/// A linear left-to-right sweep that holds at the far edge for the repeat delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanSweep {
    pub from_x: f64,
    pub to_x: f64,
    pub sweep_ms: f64,
    pub repeat_delay_ms: f64,
}

impl ScanSweep {
    /// Sweep from just off the left edge to just off the right edge of a canvas.
    pub fn across(width: f64) -> Self {
        Self {
            from_x: -SCAN_OVERSHOOT,
            to_x: width + SCAN_OVERSHOOT,
            sweep_ms: SCAN_SWEEP_MS,
            repeat_delay_ms: SCAN_REPEAT_DELAY_MS,
        }
    }

    pub fn x_at(&self, now_ms: f64) -> f64 {
        let cycle = self.sweep_ms + self.repeat_delay_ms;
        let t = progress(loop_phase(now_ms, cycle) * cycle, 0.0, self.sweep_ms);
        self.from_x + (self.to_x - self.from_x) * t
    }
}

/// Damped harmonic spring (unit mass) integrated with fixed substeps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub value: f64,
    pub velocity: f64,
    pub target: f64,
    stiffness: f64,
    damping: f64,
}

impl Spring {
    pub fn new(value: f64, stiffness: f64, damping: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            stiffness,
            damping,
        }
    }

    pub fn reticle(value: f64) -> Self {
        Self::new(value, RETICLE_STIFFNESS, RETICLE_DAMPING)
    }

    pub fn is_settled(&self) -> bool {
        self.velocity.abs() < SPRING_REST_DELTA && (self.value - self.target).abs() < SPRING_REST_DELTA
    }

    pub fn step(&mut self, dt_secs: f64) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }
        let mut remaining = dt_secs.clamp(0.0, MAX_FRAME_SECS);
        while remaining > 0.0 {
            let h = remaining.min(SPRING_SUBSTEP_SECS);
            let accel =
                -self.stiffness * (self.value - self.target) - self.damping * self.velocity;
            // Semi-implicit Euler: velocity first, then position.
            self.velocity += accel * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
    }
}

/// Rendered state of the target reticle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReticlePose {
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    pub scale: f64,
}

impl ReticlePose {
    pub fn hidden_at((x, y): (f64, f64)) -> Self {
        Self {
            x,
            y,
            opacity: 0.0,
            scale: 0.5,
        }
    }

    pub fn transform(&self) -> String {
        format!(
            "translate({:.2} {:.2}) scale({:.4})",
            self.x, self.y, self.scale
        )
    }
}

/// Springs driving the reticle toward the active centroid, or back to the
/// map center (faded and shrunk) when nothing is hovered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReticleMotion {
    x: Spring,
    y: Spring,
    opacity: Spring,
    scale: Spring,
    center: (f64, f64),
    last_frame_ms: Option<f64>,
}

impl ReticleMotion {
    pub fn new(center: (f64, f64)) -> Self {
        let pose = ReticlePose::hidden_at(center);
        Self {
            x: Spring::reticle(pose.x),
            y: Spring::reticle(pose.y),
            opacity: Spring::reticle(pose.opacity),
            scale: Spring::reticle(pose.scale),
            center,
            last_frame_ms: None,
        }
    }

    pub fn advance(&mut self, now_ms: f64, target: Option<(f64, f64)>) -> ReticlePose {
        let (tx, ty) = target.unwrap_or(self.center);
        let visible = target.is_some();
        self.x.target = tx;
        self.y.target = ty;
        self.opacity.target = if visible { 1.0 } else { 0.0 };
        self.scale.target = if visible { 1.0 } else { 0.5 };

        let dt = self
            .last_frame_ms
            .map_or(0.0, |last| (now_ms - last).max(0.0) / 1000.0);
        self.last_frame_ms = Some(now_ms);
        for spring in [&mut self.x, &mut self.y, &mut self.opacity, &mut self.scale] {
            spring.step(dt);
        }
        self.pose()
    }

    pub fn pose(&self) -> ReticlePose {
        ReticlePose {
            x: self.x.value,
            y: self.y.value,
            opacity: self.opacity.value.clamp(0.0, 1.0),
            scale: self.scale.value.max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresencePhase {
    Entering,
    Exiting,
}

/// One mounted item of a [`Presence`] list.
#[derive(Debug, Clone, PartialEq)]
pub struct PresenceEntry<K, T> {
    pub key: K,
    pub value: T,
    /// Unique per mount; use as the keyed-list key.
    pub serial: u64,
    pub phase: PresencePhase,
    changed_at: f64,
    start_level: f64,
}

impl<K, T> PresenceEntry<K, T> {
    /// Visibility level in `0..=1`, eased toward 1 while entering and 0 while exiting.
    pub fn level(&self, now_ms: f64, duration_ms: f64) -> f64 {
        let eased = cubic_ease_out(progress(now_ms, self.changed_at, duration_ms));
        match self.phase {
            PresencePhase::Entering => self.start_level + (1.0 - self.start_level) * eased,
            PresencePhase::Exiting => self.start_level * (1.0 - eased),
        }
    }
}

/// Mount/unmount-driven transitions for an optional value.
///
/// `show` mounts a value (entering), `hide` starts the exit of the current one.
/// Exiting entries stay listed until their fade finishes and [`Presence::prune`]
/// drops them. At most one entry is entering at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct Presence<K, T> {
    entries: Vec<PresenceEntry<K, T>>,
    duration_ms: f64,
    next_serial: u64,
}

impl<K: PartialEq, T> Presence<K, T> {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            entries: Vec::new(),
            duration_ms,
            next_serial: 0,
        }
    }

    pub fn entries(&self) -> &[PresenceEntry<K, T>] {
        &self.entries
    }

    pub fn current(&self) -> Option<&PresenceEntry<K, T>> {
        self.entries
            .iter()
            .find(|entry| entry.phase == PresencePhase::Entering)
    }

    pub fn level_of(&self, serial: u64, now_ms: f64) -> f64 {
        self.entries
            .iter()
            .find(|entry| entry.serial == serial)
            .map_or(0.0, |entry| entry.level(now_ms, self.duration_ms))
    }

    pub fn show(&mut self, key: K, value: T, now_ms: f64) {
        if self.current().is_some_and(|entry| entry.key == key) {
            return;
        }
        self.hide(now_ms);

        // Re-entering an item that is still fading out reverses its fade in place.
        let duration = self.duration_ms;
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.key == key && entry.phase == PresencePhase::Exiting)
        {
            entry.start_level = entry.level(now_ms, duration);
            entry.phase = PresencePhase::Entering;
            entry.changed_at = now_ms;
            entry.value = value;
            return;
        }

        let serial = self.next_serial;
        self.next_serial += 1;
        self.entries.push(PresenceEntry {
            key,
            value,
            serial,
            phase: PresencePhase::Entering,
            changed_at: now_ms,
            start_level: 0.0,
        });
    }

    pub fn hide(&mut self, now_ms: f64) {
        let duration = self.duration_ms;
        for entry in &mut self.entries {
            if entry.phase == PresencePhase::Entering {
                entry.start_level = entry.level(now_ms, duration);
                entry.phase = PresencePhase::Exiting;
                entry.changed_at = now_ms;
            }
        }
    }

    /// True when some exiting entry has finished fading.
    pub fn has_expired(&self, now_ms: f64) -> bool {
        self.entries.iter().any(|entry| self.is_expired(entry, now_ms))
    }

    /// Drop finished exits. Returns whether anything was removed.
    pub fn prune(&mut self, now_ms: f64) -> bool {
        let before = self.entries.len();
        let duration = self.duration_ms;
        self.entries.retain(|entry| {
            !(entry.phase == PresencePhase::Exiting && now_ms - entry.changed_at >= duration)
        });
        self.entries.len() != before
    }

    fn is_expired(&self, entry: &PresenceEntry<K, T>, now_ms: f64) -> bool {
        entry.phase == PresencePhase::Exiting && now_ms - entry.changed_at >= self.duration_ms
    }
}

/// SVG transform scaling by `scale` around `(cx, cy)`.
pub fn scale_about((cx, cy): (f64, f64), scale: f64) -> String {
    format!(
        "translate({cx:.2} {cy:.2}) scale({scale:.4}) translate({:.2} {:.2})",
        -cx, -cy
    )
}
