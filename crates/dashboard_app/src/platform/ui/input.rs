use dashboard_core::Msg;

pub const HELP: &str = "\
Commands:
  r, refresh        reload the current page
  run               trigger the ETL pipeline
  health            probe API liveness
  limit <n>         set the page size (blank or invalid: 50)
  offset <n>        set the page offset (blank or invalid: 0)
  search [text]     filter the loaded page (empty clears)
  help              show this help
  q, quit           exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Msg(Msg),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Maps one line typed by the operator to a command.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim_start().trim_end_matches(['\r', '\n']);
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "r" | "refresh" => Command::Msg(Msg::RefreshRequested),
        "run" => Command::Msg(Msg::RunRequested),
        "health" => Command::Msg(Msg::HealthCheckRequested),
        "limit" => Command::Msg(Msg::LimitChanged(rest.to_string())),
        "offset" => Command::Msg(Msg::OffsetChanged(rest.to_string())),
        "search" | "/" => Command::Msg(Msg::SearchChanged(rest.to_string())),
        "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(word.to_string()),
    }
}
