use std::process::Command;

use alfred_core::api::{
    partial_filter, Env, FeedbackItem, LogLevel, MenuEntry, MenuModel,
};
use anyhow::{bail, Context};

const LOGLEVEL_ARG: &str = "loglevel:";

fn model(current: LogLevel) -> anyhow::Result<MenuModel> {
    Ok(MenuModel::new([
        MenuEntry::menu("loglevel", format!("Set the logging level (currently {current})")),
        MenuEntry::keyword("show-log", "Open the workflow log file"),
        MenuEntry::keyword("reset", "Clear all workflow settings"),
    ])?)
}

pub fn tell_settings(
    env: &mut Env<'_>,
    query: &str,
    prefix: Option<&str>,
) -> anyhow::Result<Vec<FeedbackItem>> {
    let model = model(env.ctx().log_level())?;
    env.menu(&model, query, prefix)
}

pub fn tell_loglevel(
    env: &mut Env<'_>,
    query: &str,
    prefix: Option<&str>,
) -> anyhow::Result<Vec<FeedbackItem>> {
    let current = env.ctx().log_level();
    let levels = partial_filter(query.trim(), LogLevel::ALL, |l| l.as_str());
    if levels.is_empty() {
        return Ok(vec![FeedbackItem::new(format!(
            "No log level matches \"{}\"",
            query.trim()
        ))]);
    }

    Ok(levels
        .into_iter()
        .map(|level| {
            let subtitle = if level == current {
                "Current level".to_string()
            } else {
                format!("Log {} and above", level.as_str().to_lowercase())
            };
            let item = FeedbackItem::new(level.as_str())
                .subtitle(subtitle)
                .arg(format!("{LOGLEVEL_ARG}{level}"))
                .uid(format!("loglevel-{level}"))
                .autocomplete(level.as_str());
            match prefix {
                Some(p) => item.prefix(p),
                None => item,
            }
        })
        .collect())
}

pub fn do_settings(env: &mut Env<'_>, arg: &str, _modifier: Option<&str>) -> anyhow::Result<()> {
    let arg = arg.trim();
    if let Some(raw) = arg.strip_prefix(LOGLEVEL_ARG) {
        let level: LogLevel = raw.parse()?;
        env.ctx_mut().set_log_level(level)?;
        env.puts(&format!("Log level set to {level}"))?;
        return Ok(());
    }

    match arg {
        "show-log" => {
            let path = env.ctx().log_file();
            let status = Command::new("open")
                .arg(&path)
                .status()
                .with_context(|| format!("opening {}", path.display()))?;
            if !status.success() {
                bail!("could not open {}", path.display());
            }
        }
        "reset" => {
            let answer = env.ctx().services().dialogs.get_confirmation(
                "Reset settings",
                "Clear all workflow settings?",
                "No",
            )?;
            if answer != "Yes" {
                tracing::debug!(target: "alfred.settings", answer = %answer, "reset declined");
                return Ok(());
            }
            env.ctx_mut().config_mut().clear()?;
            tracing::info!(target: "alfred.settings", "configuration cleared");
            env.puts("Settings reset")?;
        }
        other => bail!("unknown setting \"{other}\""),
    }
    Ok(())
}
