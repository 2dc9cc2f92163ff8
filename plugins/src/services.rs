//! ServicesFactory implementation: wires the osascript dialogs and the
//! keychain store into the `Services` a workflow context carries.
use alfred_core::api::{Services, ServicesFactory};

use crate::dialog::DEFAULT_HOST_APP;
use crate::factory;
use crate::keychain::DEFAULT_SERVICE;

pub struct PluginServicesFactory {
    host_app: String,
    service: String,
}

impl PluginServicesFactory {
    pub fn new(host_app: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            host_app: host_app.into(),
            service: service.into(),
        }
    }
}

impl Default for PluginServicesFactory {
    fn default() -> Self {
        Self::new(DEFAULT_HOST_APP, DEFAULT_SERVICE)
    }
}

impl ServicesFactory for PluginServicesFactory {
    fn build_services(&self) -> Services {
        tracing::debug!(target: "alfred.services", host_app = %self.host_app, service = %self.service, "building services");
        Services {
            dialogs: factory::build_dialogs(&self.host_app),
            credentials: factory::build_credentials(&self.service),
        }
    }
}
