pub mod dialog;
pub mod factory;
pub mod keychain;
pub mod services;
