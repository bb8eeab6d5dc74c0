use std::collections::HashMap;

use tracing::debug;

use crate::{
    auth::password::{hash_password, verify_password},
    config::Config,
    model::role::Role,
};

/// Resolves credentials to a role.
pub trait AuthProvider: Send + Sync {
    fn authenticate(&self, username: &str, password: &str) -> Option<Role>;
}

struct Account {
    password_hash: String,
    role: Role,
}

/// Fixed in-process account table. Passwords are kept only as argon2 hashes.
pub struct StaticAuthProvider {
    accounts: HashMap<String, Account>,
}

impl StaticAuthProvider {
    pub fn new<'a, I>(accounts: I) -> Result<Self, argon2::password_hash::Error>
    where
        I: IntoIterator<Item = (&'a str, &'a str, Role)>,
    {
        let accounts = accounts
            .into_iter()
            .map(|(username, password, role)| {
                let password_hash = hash_password(password)?;
                Ok((username.to_string(), Account { password_hash, role }))
            })
            .collect::<Result<_, argon2::password_hash::Error>>()?;

        Ok(Self { accounts })
    }

    /// The two site accounts: `developer` and `user` (maintenance).
    pub fn from_config(config: &Config) -> Result<Self, argon2::password_hash::Error> {
        Self::new([
            ("developer", config.developer_password.as_str(), Role::Developer),
            ("user", config.maintenance_password.as_str(), Role::Maintenance),
        ])
    }
}

impl AuthProvider for StaticAuthProvider {
    fn authenticate(&self, username: &str, password: &str) -> Option<Role> {
        let account = self.accounts.get(username)?;

        match verify_password(password, &account.password_hash) {
            Ok(()) => Some(account.role),
            Err(e) => {
                debug!(username, error = %e, "Password mismatch");
                None
            }
        }
    }
}
