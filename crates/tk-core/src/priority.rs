//! Tick priority — the tie-break class among ticks due on the same step.
//!
//! Priorities are a sort key only.  Nothing in the scheduler branches on a
//! specific level.

/// Seven ordered levels; a lower value runs earlier.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickPriority {
    ExtremelyHigh = -3,
    VeryHigh      = -2,
    High          = -1,
    #[default]
    Normal        = 0,
    Low           = 1,
    VeryLow       = 2,
    ExtremelyLow  = 3,
}

impl TickPriority {
    /// All levels in ascending (run-first) order.
    pub const ALL: [TickPriority; 7] = [
        TickPriority::ExtremelyHigh,
        TickPriority::VeryHigh,
        TickPriority::High,
        TickPriority::Normal,
        TickPriority::Low,
        TickPriority::VeryLow,
        TickPriority::ExtremelyLow,
    ];

    /// Integer value used in persisted tick lists.
    #[inline]
    pub fn value(self) -> i32 {
        self as i32
    }

    /// Inverse of [`value`](Self::value).  Out-of-range values clamp to the
    /// nearest level so a damaged save never loses a tick over its priority.
    pub fn from_value(value: i32) -> TickPriority {
        let clamped = value.clamp(Self::ExtremelyHigh.value(), Self::ExtremelyLow.value());
        Self::ALL[(clamped - Self::ExtremelyHigh.value()) as usize]
    }

    /// Human-readable label, useful for log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            TickPriority::ExtremelyHigh => "extremely_high",
            TickPriority::VeryHigh      => "very_high",
            TickPriority::High          => "high",
            TickPriority::Normal        => "normal",
            TickPriority::Low           => "low",
            TickPriority::VeryLow       => "very_low",
            TickPriority::ExtremelyLow  => "extremely_low",
        }
    }
}

impl std::fmt::Display for TickPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
