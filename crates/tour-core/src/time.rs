//! Time-of-day model and delivery time windows.
//!
//! # Design
//!
//! All planning arithmetic is done in whole **seconds of day** (`u32`).
//! Integer seconds keep tour costs exact (no floating-point drift) and make
//! comparisons O(1).  A tour that runs past midnight wraps via
//! `mod SECONDS_PER_DAY`, matching the window-comparison convention.
//!
//! A [`TimeWindow`] is the half-open interval `[start_s, end_s)` during
//! which a waypoint may be serviced.  The default window spans the full day
//! and therefore constrains nothing.

use crate::error::CoreError;

/// Seconds in one day.  Also the cost penalty the solver applies to a
/// branch that violates a time window (longer than any feasible tour).
pub const SECONDS_PER_DAY: u32 = 86_400;

// ── TimeWindow ────────────────────────────────────────────────────────────────

/// The half-open `[start_s, end_s)` interval during which a waypoint may be
/// serviced, in seconds of day.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindow {
    pub start_s: u32,
    pub end_s:   u32,
}

impl TimeWindow {
    #[inline]
    pub fn new(start_s: u32, end_s: u32) -> Self {
        Self { start_s, end_s }
    }

    /// The unconstrained window `[0, 86_400)`.
    #[inline]
    pub fn full_day() -> Self {
        Self { start_s: 0, end_s: SECONDS_PER_DAY }
    }

    /// `true` if this window constrains nothing.
    #[inline]
    pub fn is_unconstrained(&self) -> bool {
        self.start_s == 0 && self.end_s >= SECONDS_PER_DAY
    }

    /// `true` if a visit arriving at `arrival_s` (seconds of day) can be
    /// serviced for `service_s` seconds entirely inside the window.
    #[inline]
    pub fn admits(&self, arrival_s: u32, service_s: u32) -> bool {
        self.start_s <= arrival_s && arrival_s.saturating_add(service_s) <= self.end_s
    }

    /// Seconds to wait if `arrival_s` is before the window opens, else 0.
    #[inline]
    pub fn wait_for(&self, arrival_s: u32) -> u32 {
        self.start_s.saturating_sub(arrival_s)
    }

    /// Check the window is self-consistent for a visit of `service_s`
    /// seconds: `start ≤ end` and `start + service ≤ end`.
    ///
    /// A window that fails this check can never be met; request loaders
    /// reject it up front (the solver itself would merely penalize it).
    pub fn validate(&self, service_s: u32) -> Result<(), CoreError> {
        if self.start_s > self.end_s {
            return Err(CoreError::InvalidWindow { start_s: self.start_s, end_s: self.end_s });
        }
        if self.start_s.saturating_add(service_s) > self.end_s {
            return Err(CoreError::WindowTooShort {
                start_s:   self.start_s,
                end_s:     self.end_s,
                service_s,
            });
        }
        Ok(())
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::full_day()
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {})",
            format_time_of_day(self.start_s),
            format_time_of_day(self.end_s)
        )
    }
}

// ── Time-of-day parsing ───────────────────────────────────────────────────────

/// Parse a time of day into seconds.
///
/// Accepts `h:m:s` (as request files use, e.g. `8:30:00`) or a plain
/// non-negative seconds value (e.g. `30600`).
pub fn parse_time_of_day(s: &str) -> Result<u32, CoreError> {
    let s = s.trim();
    if !s.contains(':') {
        return s
            .parse::<u32>()
            .map_err(|_| CoreError::TimeSyntax(s.to_string()));
    }

    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return Err(CoreError::TimeSyntax(s.to_string()));
    }
    let h: u32 = parts[0].parse().map_err(|_| CoreError::TimeSyntax(s.to_string()))?;
    let m: u32 = parts[1].parse().map_err(|_| CoreError::TimeSyntax(s.to_string()))?;
    let sec: u32 = parts[2].parse().map_err(|_| CoreError::TimeSyntax(s.to_string()))?;
    if h >= 24 || m >= 60 || sec >= 60 {
        return Err(CoreError::TimeSyntax(s.to_string()));
    }
    Ok(h * 3_600 + m * 60 + sec)
}

/// Format seconds of day as `hh:mm:ss` for logs and exports.
pub fn format_time_of_day(secs: u32) -> String {
    let secs = secs % SECONDS_PER_DAY;
    format!("{:02}:{:02}:{:02}", secs / 3_600, (secs % 3_600) / 60, secs % 60)
}
