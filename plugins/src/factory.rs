use alfred_core::api::{CredentialStore, DialogHost};

use crate::dialog::OsaScriptDialogs;
use crate::keychain::SecurityKeychain;

pub fn build_dialogs(host_app: &str) -> Box<dyn DialogHost> {
    Box::new(OsaScriptDialogs::new(host_app))
}

pub fn build_credentials(service: &str) -> Box<dyn CredentialStore> {
    Box::new(SecurityKeychain::new(service))
}
