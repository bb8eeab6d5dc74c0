use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Account role tag carried in the session.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Developer,
    Maintenance,
}

impl Role {
    /// Developers administer the asset master.
    pub fn can_manage_assets(&self) -> bool {
        *self == Role::Developer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn tags_are_lowercase() {
        assert_eq!(Role::Developer.to_string(), "developer");
        assert_eq!(Role::from_str("maintenance"), Ok(Role::Maintenance));
        assert!(Role::from_str("admin").is_err());
    }
}
