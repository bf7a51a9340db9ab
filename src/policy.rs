/// A per-call decision about whether Hawk processing applies.
///
/// A call that says nothing inherits the global setting; an explicit value always wins, in
/// either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enablement {
    Inherit,
    ForceOn,
    ForceOff,
}

impl Default for Enablement {
    fn default() -> Self {
        Enablement::Inherit
    }
}

impl From<Option<bool>> for Enablement {
    fn from(enabled: Option<bool>) -> Self {
        match enabled {
            None => Enablement::Inherit,
            Some(true) => Enablement::ForceOn,
            Some(false) => Enablement::ForceOff,
        }
    }
}

impl Enablement {
    /// Combine this per-call value with the global `enabled` setting.
    pub fn is_enabled(self, global: bool) -> bool {
        match self {
            Enablement::Inherit => global,
            Enablement::ForceOn => true,
            Enablement::ForceOff => false,
        }
    }
}

/// Decide whether Hawk processing is skipped for a call, given the global setting and the
/// call's own `enabled` option, if any.
pub fn is_disabled(global: bool, per_call: Option<bool>) -> bool {
    !Enablement::from(per_call).is_enabled(global)
}
