pub mod account;
pub mod ira_account;

pub use account::Account;
pub use ira_account::IraAccount;
