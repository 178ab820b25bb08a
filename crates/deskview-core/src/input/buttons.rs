//! Pointer button bitmask and its single-button resolution.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw pointer button state as reported by the host input system.
///
/// Bit layout:
/// - Bit 0: primary (usually left)
/// - Bit 1: secondary (usually right)
/// - Bit 2: middle / wheel button
/// - Bit 3: back
/// - Bit 4: forward
///
/// Several bits may be set at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonMask(pub u32);

impl ButtonMask {
    pub const PRIMARY: u32 = 1 << 0;
    pub const SECONDARY: u32 = 1 << 1;
    pub const MIDDLE: u32 = 1 << 2;
    pub const BACK: u32 = 1 << 3;
    pub const FORWARD: u32 = 1 << 4;

    pub fn primary(&self) -> bool {
        self.0 & Self::PRIMARY != 0
    }

    pub fn secondary(&self) -> bool {
        self.0 & Self::SECONDARY != 0
    }

    pub fn middle(&self) -> bool {
        self.0 & Self::MIDDLE != 0
    }
}

/// The single button identity carried by remote mouse events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum MouseKey {
    #[default]
    None = 0,
    Left = 1,
    Right = 2,
    Wheel = 3,
}

impl MouseKey {
    /// Picks exactly one key from a possibly multi-bit mask.
    ///
    /// First match wins, in the order primary → secondary → middle.  Any other
    /// combination (including an empty mask or only back/forward bits) yields
    /// [`MouseKey::None`].
    pub fn resolve(mask: ButtonMask) -> MouseKey {
        if mask.primary() {
            MouseKey::Left
        } else if mask.secondary() {
            MouseKey::Right
        } else if mask.middle() {
            MouseKey::Wheel
        } else {
            MouseKey::None
        }
    }
}

/// A byte that is not a [`MouseKey`] discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown mouse key code: {0}")]
pub struct UnknownMouseKey(pub u8);

impl TryFrom<u8> for MouseKey {
    type Error = UnknownMouseKey;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MouseKey::None),
            1 => Ok(MouseKey::Left),
            2 => Ok(MouseKey::Right),
            3 => Ok(MouseKey::Wheel),
            other => Err(UnknownMouseKey(other)),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
