use rand::Rng;
use std::fmt;

/// Embed colors used for roll results.
pub const ROLL_COLOR: u32 = 0x3498DB;
pub const NATURAL_TWENTY_COLOR: u32 = 0x2ECC71;
pub const CRITICAL_FAIL_COLOR: u32 = 0xE74C3C;

/// The dice offered on a roll prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DieSpec {
    D4,
    D6,
    D8,
    D20,
}

impl DieSpec {
    /// All dice, in the order their buttons are laid out.
    pub const ALL: [DieSpec; 4] = [DieSpec::D4, DieSpec::D6, DieSpec::D8, DieSpec::D20];

    pub fn max(self) -> u32 {
        match self {
            DieSpec::D4 => 4,
            DieSpec::D6 => 6,
            DieSpec::D8 => 8,
            DieSpec::D20 => 20,
        }
    }

    /// Button custom id, also accepted by [`DieSpec::from_custom_id`].
    pub fn custom_id(self) -> &'static str {
        match self {
            DieSpec::D4 => "d4",
            DieSpec::D6 => "d6",
            DieSpec::D8 => "d8",
            DieSpec::D20 => "d20",
        }
    }

    /// Maps a button custom id back to a die. Unknown ids yield `None`.
    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|die| die.custom_id() == custom_id)
    }

    pub fn roll<R: Rng + ?Sized>(self, rng: &mut R) -> RollOutcome {
        RollOutcome::new(self, rng.gen_range(1..=self.max()))
    }
}

impl fmt::Display for DieSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.max())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollOutcome {
    pub die: DieSpec,
    pub value: u32,
    pub critical: bool,
}

impl RollOutcome {
    pub fn new(die: DieSpec, value: u32) -> Self {
        let critical = die == DieSpec::D20 && (value == 1 || value == die.max());
        Self {
            die,
            value,
            critical,
        }
    }

    pub fn is_natural_twenty(&self) -> bool {
        self.critical && self.value == 20
    }

    pub fn is_critical_fail(&self) -> bool {
        self.critical && self.value == 1
    }

    pub fn color(&self) -> u32 {
        if self.is_natural_twenty() {
            NATURAL_TWENTY_COLOR
        } else if self.is_critical_fail() {
            CRITICAL_FAIL_COLOR
        } else {
            ROLL_COLOR
        }
    }

    /// Headline shown on the result embed.
    pub fn headline(&self) -> String {
        if self.is_natural_twenty() {
            "🎲 💥 NATURAL 20!".to_string()
        } else if self.is_critical_fail() {
            "🎲 ☠️ CRITICAL FAIL!".to_string()
        } else {
            format!("🎲 You rolled a {}", self.die)
        }
    }
}
