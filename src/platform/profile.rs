//! Platform profiles
//!
//! Touch devices get a faster, more generous preset and slide controls.
//! The profile is picked once per session and never re-checked.

use serde::{Deserialize, Serialize};

use crate::sim::ControlScheme;

/// Input-capability class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProfileKind {
    /// Desktop, mouse and keyboard
    #[default]
    Standard,
    /// Phones and tablets
    Compact,
}

impl ProfileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::Standard => "Standard",
            ProfileKind::Compact => "Compact",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "desktop" => Some(ProfileKind::Standard),
            "compact" | "touch" | "mobile" => Some(ProfileKind::Compact),
            _ => None,
        }
    }
}

/// Immutable per-session constants derived from the device class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformProfile {
    pub kind: ProfileKind,
    /// Score gained per frame at multiplier 1.0
    pub base_score_rate: f32,
    /// Background scroll per frame at multiplier 0
    pub base_background_speed: f32,
    /// Extra background scroll per unit of multiplier
    pub background_gain_factor: f32,
    /// Obstacle speed at session start
    pub initial_obstacle_speed: f32,
    /// Pointer control scheme
    pub control: ControlScheme,
}

impl PlatformProfile {
    pub const STANDARD: Self = Self {
        kind: ProfileKind::Standard,
        base_score_rate: 0.1,
        base_background_speed: 5.0,
        background_gain_factor: 0.5,
        initial_obstacle_speed: 300.0,
        control: ControlScheme::Nudge,
    };

    pub const COMPACT: Self = Self {
        kind: ProfileKind::Compact,
        base_score_rate: 0.15,
        base_background_speed: 8.0,
        background_gain_factor: 0.8,
        initial_obstacle_speed: 400.0,
        control: ControlScheme::Slide,
    };

    pub fn from_kind(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Standard => Self::STANDARD,
            ProfileKind::Compact => Self::COMPACT,
        }
    }

    /// Detect the profile from the browser's user agent
    #[cfg(target_arch = "wasm32")]
    pub fn detect() -> Self {
        let ua = web_sys::window()
            .and_then(|w| w.navigator().user_agent().ok())
            .unwrap_or_default();
        let kind = kind_for_user_agent(&ua);
        log::info!("Platform profile: {}", kind.as_str());
        Self::from_kind(kind)
    }

    /// Native builds are always desktop
    #[cfg(not(target_arch = "wasm32"))]
    pub fn detect() -> Self {
        Self::STANDARD
    }
}

impl Default for PlatformProfile {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Classify a user agent string
pub fn kind_for_user_agent(ua: &str) -> ProfileKind {
    const MOBILE_MARKERS: [&str; 4] = ["Android", "iPhone", "iPad", "iPod"];
    if MOBILE_MARKERS.iter().any(|m| ua.contains(m)) {
        ProfileKind::Compact
    } else {
        ProfileKind::Standard
    }
}
