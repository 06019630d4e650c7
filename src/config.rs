//! Display configuration.
//!
//! The pretty printer can either render plain nested brackets or prefix the
//! output with a header that pastes straight into NumPy, which is handy when
//! cross-checking results.
//!
//! The mode is stored globally in an `AtomicU8`, so it can be flipped at
//! runtime from anywhere without threading a handle through every call.

use core::convert::TryFrom;
use core::sync::atomic::{AtomicU8, Ordering};

/// How [`crate::tensors::Tensor`] values render through `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum DisplayMode {
    /// Nested brackets only (default).
    #[default]
    Pretty = 0,
    /// Nested brackets preceded by a `np.array(..).reshape(..)` header.
    NumPy = 1,
}

impl TryFrom<u8> for DisplayMode {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Pretty),
            1 => Ok(Self::NumPy),
            _ => Err(()),
        }
    }
}

/// Global display mode.
///
/// Relaxed ordering is enough: the mode only affects formatting and is
/// expected to change rarely.
static GLOBAL_DISPLAY_MODE: AtomicU8 = AtomicU8::new(DisplayMode::Pretty as u8);

/// Sets the display mode used by every subsequent `Display` call.
///
/// # Example
/// ```
/// use tensor_mlp::config::{set_display_mode, DisplayMode};
/// set_display_mode(DisplayMode::NumPy);
/// set_display_mode(DisplayMode::Pretty);
/// ```
pub fn set_display_mode(mode: DisplayMode) {
    GLOBAL_DISPLAY_MODE.store(mode as u8, Ordering::Relaxed);
}

/// Returns the active display mode, falling back to [`DisplayMode::Pretty`]
/// if the stored value is unrecognized.
pub fn display_mode() -> DisplayMode {
    DisplayMode::try_from(GLOBAL_DISPLAY_MODE.load(Ordering::Relaxed)).unwrap_or_default()
}
