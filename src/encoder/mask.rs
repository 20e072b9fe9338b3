//! Fixed-width button bitmask

use crate::gamepad::{GamepadLayout, MAX_SLOTS};
use std::fmt;

/// Pressed buttons of one action, one bit per layout slot.
///
/// Bit `i` stands for slot `i` of the layout the mask was encoded for.
/// `width` is that layout's slot count; bits at or above it are never set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonMask {
    bits: u64,
    width: u8,
}

impl ButtonMask {
    /// All-zero mask (the no-op) of `width` slots
    ///
    /// # Panics
    /// Panics if `width` exceeds [`MAX_SLOTS`].
    pub fn empty(width: usize) -> Self {
        assert!(
            width <= MAX_SLOTS,
            "mask width {} exceeds {} slots",
            width,
            MAX_SLOTS
        );
        Self {
            bits: 0,
            width: width as u8,
        }
    }

    /// Sets the bit for `slot`
    ///
    /// # Panics
    /// Panics if `slot` is outside the mask width.
    pub fn press(&mut self, slot: usize) {
        assert!(
            slot < self.width(),
            "slot {} out of range for width {}",
            slot,
            self.width
        );
        self.bits |= 1u64 << slot;
    }

    pub fn with_pressed(mut self, slot: usize) -> Self {
        self.press(slot);
        self
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn is_pressed(&self, slot: usize) -> bool {
        slot < self.width() && (self.bits >> slot) & 1 != 0
    }

    pub fn is_noop(&self) -> bool {
        self.bits == 0
    }

    /// Number of pressed buttons
    pub fn count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Pressed slot positions, ascending
    pub fn pressed_slots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.width()).filter(move |&slot| self.is_pressed(slot))
    }

    /// One boolean per slot, the form an emulator input vector takes
    pub fn to_bools(&self) -> Vec<bool> {
        (0..self.width()).map(|slot| self.is_pressed(slot)).collect()
    }

    /// Labels of the pressed slots in layout order
    pub fn labels<'a>(&self, layout: &'a GamepadLayout) -> Vec<&'a str> {
        self.pressed_slots()
            .filter_map(|slot| layout.label(slot))
            .collect()
    }
}

/// Slot 0 first, e.g. `00000100` for DOWN on the atari layout
impl fmt::Display for ButtonMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in 0..self.width() {
            f.write_str(if self.is_pressed(slot) { "1" } else { "0" })?;
        }
        Ok(())
    }
}
