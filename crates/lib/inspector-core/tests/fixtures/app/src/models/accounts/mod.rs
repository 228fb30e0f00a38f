pub mod account;
pub mod ira_account;
