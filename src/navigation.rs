// Navigation targets the workflows can send the user to

#[cfg(test)]
use mockall::automock;

use crate::workflows::signup::AccountType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    AccountTypeSelection,
    RegisterContinuation { account_type: AccountType },
    Dashboard,
    ArticleList,
    ResetPassword,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::AccountTypeSelection => "/signup/account-type".to_string(),
            Route::RegisterContinuation { account_type } => {
                format!("/register?type={}", account_type.as_str())
            }
            Route::Dashboard => "/dashboard".to_string(),
            Route::ArticleList => "/dashboard/articles".to_string(),
            Route::ResetPassword => "/reset-password".to_string(),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// Receives navigation requests issued by workflows
#[cfg_attr(test, automock)]
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
