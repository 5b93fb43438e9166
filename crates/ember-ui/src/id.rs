/// Identity of an immediate-mode widget.
///
/// `primary` is normally the source line of the call site (see [`ui_id!`]);
/// `secondary` tells apart widgets created from the same line, e.g. in a
/// loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UiId {
    pub primary: i32,
    pub secondary: i32,
}

impl UiId {
    /// No widget.
    pub const INVALID: UiId = UiId::new(-1, -1);

    #[inline]
    pub const fn new(primary: i32, secondary: i32) -> Self {
        Self { primary, secondary }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for UiId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Builds a [`UiId`] from the current source line.
///
/// `ui_id!()` uses secondary `0`; `ui_id!(n)` uses `n` as the secondary.
#[macro_export]
macro_rules! ui_id {
    () => {
        $crate::UiId::new(line!() as i32, 0)
    };
    ($secondary:expr) => {
        $crate::UiId::new(line!() as i32, ($secondary) as i32)
    };
}
