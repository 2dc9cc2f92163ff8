//! Actions every workflow binary ships with.

mod password;
mod settings;

use alfred_core::api::ActionRegistry;

pub fn registry() -> ActionRegistry {
    let mut reg = ActionRegistry::new();
    register(&mut reg);
    reg
}

pub fn register(reg: &mut ActionRegistry) {
    reg.register_tell("settings", settings::tell_settings)
        .register_tell("loglevel", settings::tell_loglevel)
        .register_do("settings", settings::do_settings)
        .register_tell("password", password::tell_password)
        .register_do("password", password::do_password);
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    use alfred_core::api::{
        Credential, CredentialError, CredentialStore, DialogError, DialogHost, Dispatcher,
        FeedbackItem, InputRequest, ScriptOutput, Services, UserInput, WorkflowContext,
        WorkflowInfo,
    };
    use tempfile::TempDir;

    /// Dialogs that answer from a script instead of asking anyone.
    #[derive(Default)]
    pub struct CannedDialogs {
        pub input: Option<UserInput>,
        pub confirm: String,
        pub prompts: Rc<RefCell<Vec<String>>>,
    }

    impl DialogHost for CannedDialogs {
        fn name(&self) -> &str {
            "canned"
        }

        fn run_script(&self, _script: &str) -> Result<ScriptOutput, DialogError> {
            Ok(ScriptOutput::default())
        }

        fn get_from_user(&self, request: &InputRequest<'_>) -> Result<UserInput, DialogError> {
            self.prompts.borrow_mut().push(request.prompt.to_string());
            assert!(request.hidden);
            self.input.clone().ok_or(DialogError::Unsupported)
        }

        fn get_selection_from_user(
            &self,
            _title: &str,
            _prompt: &str,
            _choices: &[&str],
            _default: Option<&str>,
            _multiple: bool,
        ) -> Result<Option<String>, DialogError> {
            Ok(None)
        }

        fn get_confirmation(
            &self,
            _title: &str,
            prompt: &str,
            _default_button: &str,
        ) -> Result<String, DialogError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            Ok(self.confirm.clone())
        }

        fn show_message(&self, _title: &str, _message: &str) -> Result<(), DialogError> {
            Ok(())
        }
    }

    #[derive(Default, Clone)]
    pub struct MemoryCredentials {
        pub items: Rc<RefCell<BTreeMap<String, String>>>,
    }

    impl CredentialStore for MemoryCredentials {
        fn service(&self) -> &str {
            "test"
        }

        fn get(&self, account: &str) -> Result<Option<Credential>, CredentialError> {
            Ok(self.items.borrow().get(account).map(|pw| Credential {
                service: Some("test".into()),
                account: Some(account.into()),
                comment: None,
                password: Some(pw.clone()),
            }))
        }

        fn set(
            &self,
            account: &str,
            password: &str,
            _comment: Option<&str>,
        ) -> Result<(), CredentialError> {
            self.items
                .borrow_mut()
                .insert(account.to_string(), password.to_string());
            Ok(())
        }

        fn delete(&self, account: &str) -> Result<(), CredentialError> {
            match self.items.borrow_mut().remove(account) {
                Some(_) => Ok(()),
                None => Err(CredentialError::Command {
                    account: account.to_string(),
                    message: "not found".into(),
                }),
            }
        }
    }

    pub fn context(dir: &TempDir, services: Services) -> WorkflowContext {
        let info = WorkflowInfo::new(
            dir.path(),
            "com.example.builtin",
            "Builtin",
            dir.path().join("data"),
            dir.path().join("cache"),
        );
        WorkflowContext::load(info, true)
            .unwrap()
            .with_services(services)
    }

    pub fn tell(ctx: &mut WorkflowContext, action: &str, query: &str) -> Vec<FeedbackItem> {
        let d = Dispatcher::new(super::registry());
        d.tell(ctx, action, query).unwrap()
    }

    pub fn act(ctx: &mut WorkflowContext, action: &str, query: &str) -> String {
        let d = Dispatcher::new(super::registry());
        let mut out = Vec::new();
        d.emit_do(ctx, action, query, None, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }
}
