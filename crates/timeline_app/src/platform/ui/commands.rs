use timeline_core::{Msg, TweetId};

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Dispatch(Msg),
    List,
    Help,
    Quit,
}

pub(crate) const HELP: &str =
    "commands: list | poll | fav <id> | refetch <id> | delete <id> | reload | quit";

/// Parses one line of console input. Blank lines yield `None`.
pub(crate) fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if words.next().is_some() {
        return Err(format!("too many arguments for {verb:?}"));
    }

    let command = match (verb.to_ascii_lowercase().as_str(), arg) {
        ("list" | "ls", None) => Command::List,
        ("help" | "?", None) => Command::Help,
        ("quit" | "exit" | "q", None) => Command::Quit,
        ("poll", None) => Command::Dispatch(Msg::PollTick),
        ("reload", None) => Command::Dispatch(Msg::ForceReloadClicked),
        ("fav" | "favorite" | "favourite", Some(id)) => {
            Command::Dispatch(Msg::FavoriteClicked(parse_id(id)?))
        }
        ("refetch" | "refresh", Some(id)) => {
            Command::Dispatch(Msg::RefetchClicked(parse_id(id)?))
        }
        ("delete" | "rm", Some(id)) => Command::Dispatch(Msg::DeleteClicked(parse_id(id)?)),
        (other, _) => return Err(format!("unknown command {other:?}; {HELP}")),
    };
    Ok(Some(command))
}

fn parse_id(raw: &str) -> Result<TweetId, String> {
    if raw.bytes().all(|b| b.is_ascii_digit()) {
        Ok(TweetId::new(raw))
    } else {
        Err(format!("tweet ids are numeric, got {raw:?}"))
    }
}
