use alfred_core::api::{Env, FeedbackItem, InputRequest};
use anyhow::bail;

const DELETE_BUTTON: &str = "Delete";

pub fn tell_password(
    env: &mut Env<'_>,
    query: &str,
    _prefix: Option<&str>,
) -> anyhow::Result<Vec<FeedbackItem>> {
    let account = query.trim();
    if account.is_empty() {
        return Ok(vec![FeedbackItem::new("Type an account name")]);
    }

    let store = &env.ctx().services().credentials;
    let item = match store.get(account)? {
        Some(_) => FeedbackItem::new(format!("Password stored for \"{account}\""))
            .subtitle("Action to replace or delete it"),
        None => FeedbackItem::new(format!("No password stored for \"{account}\""))
            .subtitle("Action to set one"),
    };
    Ok(vec![item.arg(account)])
}

pub fn do_password(env: &mut Env<'_>, query: &str, _modifier: Option<&str>) -> anyhow::Result<()> {
    let account = query.trim();
    if account.is_empty() {
        bail!("an account name is required");
    }

    let prompt = format!("Password for {account}");
    let reply = {
        let services = env.ctx().services();
        let mut request = InputRequest {
            title: "Password",
            prompt: &prompt,
            hidden: true,
            ..Default::default()
        };
        if services.credentials.get(account)?.is_some() {
            request.extra_buttons.push(DELETE_BUTTON);
        }
        services.dialogs.get_from_user(&request)?
    };

    if reply.cancelled() {
        return Ok(());
    }

    let credentials = &env.ctx().services().credentials;
    let message = if reply.button == DELETE_BUTTON {
        credentials.delete(account)?;
        tracing::info!(target: "alfred.password", account, service = credentials.service(), "password deleted");
        format!("Deleted password for {account}")
    } else {
        credentials.set(account, &reply.text, None)?;
        tracing::info!(target: "alfred.password", account, service = credentials.service(), "password saved");
        format!("Saved password for {account}")
    };
    env.puts(&message)?;
    Ok(())
}
