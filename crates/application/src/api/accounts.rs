//! Account administration

use unifind_domain::resources::{Account, AccountUpdate, NewAccount};

use super::segment;
use crate::auth::AuthenticatedClient;
use crate::error::ApplicationResult;
use crate::ports::HttpTransport;

const USERS: &str = "/admin/users/";

/// Access to `/admin/users/`. Every call needs an administrator session.
pub struct AccountsApi<T: HttpTransport> {
    authed: AuthenticatedClient<T>,
}

impl<T: HttpTransport> AccountsApi<T> {
    /// Creates the client.
    #[must_use]
    pub const fn new(authed: AuthenticatedClient<T>) -> Self {
        Self { authed }
    }

    /// Lists all accounts.
    ///
    /// # Errors
    ///
    /// Returns any facade error.
    pub async fn list(&self) -> ApplicationResult<Vec<Account>> {
        self.authed.get(USERS).await
    }

    /// Reads one account.
    ///
    /// # Errors
    ///
    /// Returns `Domain` for an unusable id, otherwise any facade error.
    pub async fn get(&self, id: &str) -> ApplicationResult<Account> {
        self.authed.get(&format!("{USERS}{}", segment(id)?)).await
    }

    /// Looks an account up by email.
    ///
    /// # Errors
    ///
    /// Returns `Domain` for an unusable email, otherwise any facade error.
    pub async fn search_by_email(&self, email: &str) -> ApplicationResult<Account> {
        self.authed
            .get(&format!("{USERS}search/email/{}", segment(email.trim())?))
            .await
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns `Domain` if the payload is invalid, otherwise any facade error.
    pub async fn create(&self, account: &NewAccount) -> ApplicationResult<Account> {
        account.validate()?;
        self.authed.post(USERS, account).await
    }

    /// Edits an account.
    ///
    /// # Errors
    ///
    /// Returns `Domain` if the payload is invalid, otherwise any facade error.
    pub async fn update(&self, id: &str, update: &AccountUpdate) -> ApplicationResult<Account> {
        update.validate()?;
        self.authed
            .put(&format!("{USERS}{}", segment(id)?), update)
            .await
    }

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// Returns any facade error.
    pub async fn delete(&self, id: &str) -> ApplicationResult<()> {
        self.authed.delete(&format!("{USERS}{}", segment(id)?)).await
    }
}
