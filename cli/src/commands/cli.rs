use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Run an Alfred workflow action")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Produce feedback items for a script filter.
    Tell(TellArgs),
    /// Perform an action on a selected item.
    Do(DoArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TellArgs {
    pub action: String,

    /// Text typed after the workflow keyword.
    #[arg(allow_hyphen_values = true)]
    pub query: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DoArgs {
    pub action: String,

    #[arg(allow_hyphen_values = true)]
    pub query: Option<String>,

    /// Modifier key held when the item was actioned (cmd, alt, ctrl, ...).
    pub modifier: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tell_query_is_optional() {
        let args = Args::try_parse_from(["alfred", "tell", "settings"]).unwrap();
        match args.command {
            Commands::Tell(t) => {
                assert_eq!(t.action, "settings");
                assert_eq!(t.query, None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn do_accepts_modifier() {
        let args = Args::try_parse_from(["alfred", "do", "password", "me", "cmd"]).unwrap();
        match args.command {
            Commands::Do(d) => {
                assert_eq!(d.query.as_deref(), Some("me"));
                assert_eq!(d.modifier.as_deref(), Some("cmd"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn query_may_start_with_a_dash() {
        let args = Args::try_parse_from(["alfred", "tell", "search", "-v"]).unwrap();
        match args.command {
            Commands::Tell(t) => assert_eq!(t.query.as_deref(), Some("-v")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn do_modifier_is_optional() {
        let args = Args::try_parse_from(["alfred", "do", "settings", "reset"]).unwrap();
        match args.command {
            Commands::Do(d) => assert_eq!(d.modifier, None),
            other => panic!("unexpected {other:?}"),
        }
    }
}
