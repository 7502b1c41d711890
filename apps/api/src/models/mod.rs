pub mod account;
pub mod portfolio;
pub mod profile;
pub mod site;
