/// Story flags — boolean switches defaulting to unset.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct FlagSet {
    flags: FxHashMap<String, bool>,
}

impl FlagSet {
    /// Unknown flags read as `false`; no key ever fails.
    pub fn get(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    pub fn set(&mut self, name: &str, value: bool) {
        self.flags.insert(name.to_string(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_flag_is_false() {
        let flags = FlagSet::default();
        assert!(!flags.get("met_the_doctor"));
    }

    #[test]
    fn set_then_get() {
        let mut flags = FlagSet::default();
        flags.set("met_the_doctor", true);
        assert!(flags.get("met_the_doctor"));
        flags.set("met_the_doctor", false);
        assert!(!flags.get("met_the_doctor"));
    }
}
