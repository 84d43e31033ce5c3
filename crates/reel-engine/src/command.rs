//! Line-oriented command language for the REPL and script files.
//!
//! The grammar lives in `reel.pest`. Blank lines and `#` comments parse to
//! `None`.

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;
use reel_codegen::{Framework, Language};
use thiserror::Error;

#[derive(Parser)]
#[grammar = "reel.pest"]
pub struct CommandParser;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Syntax error: {0}")]
    Pest(#[from] pest::error::Error<Rule>),
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("{flag} expects a number of milliseconds, got '{value}'")]
    InvalidNumber { flag: &'static str, value: String },
    #[error("generate: unexpected argument '{0}'")]
    UnexpectedArgument(String),
    #[error("Unknown rule: {0:?}")]
    UnknownRule(Rule),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Goto {
        url: String,
    },
    Click {
        selector: String,
    },
    Fill {
        selector: String,
        value: String,
    },
    Type {
        selector: String,
        text: String,
        delay: Option<u64>,
    },
    Press {
        key: String,
    },
    Select {
        selector: String,
        value: String,
    },
    Hover {
        selector: String,
    },
    Check {
        selector: String,
    },
    Uncheck {
        selector: String,
    },
    Wait {
        selector: String,
        timeout_ms: Option<u64>,
    },
    Screenshot {
        name: Option<String>,
    },
    RecordStart {
        name: String,
    },
    RecordStop,
    Status,
    Generate {
        framework: Option<Framework>,
        language: Option<Language>,
        file: Option<String>,
    },
    Close,
}

pub fn parse_command(input: &str) -> Result<Option<Command>, ParseError> {
    let mut pairs = CommandParser::parse(Rule::line, input)?;
    let Some(line) = pairs.next() else {
        return Ok(None);
    };

    for inner in line.into_inner() {
        match inner.as_rule() {
            Rule::EOI | Rule::comment => {}
            _ => return build_command(inner).map(Some),
        }
    }
    Ok(None)
}

fn build_command(pair: Pair<Rule>) -> Result<Command, ParseError> {
    let rule = pair.as_rule();
    let mut head = None;
    let mut values = Vec::new();
    let mut delay = None;
    let mut timeout_ms = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::value => values.push(parse_value(inner)),
            Rule::bare if head.is_none() => head = Some(inner.as_str().to_string()),
            Rule::delay_opt => delay = Some(parse_millis(inner, "--delay")?),
            Rule::timeout_opt => timeout_ms = Some(parse_millis(inner, "--timeout")?),
            _ => {}
        }
    }

    let mut args = values.into_iter();
    let command = match rule {
        Rule::goto_cmd => Command::Goto {
            url: take(&mut args),
        },
        Rule::click_cmd => Command::Click {
            selector: take(&mut args),
        },
        Rule::fill_cmd => Command::Fill {
            selector: take(&mut args),
            value: take(&mut args),
        },
        Rule::type_cmd => Command::Type {
            selector: take(&mut args),
            text: take(&mut args),
            delay,
        },
        Rule::press_cmd => Command::Press {
            key: take(&mut args),
        },
        Rule::select_cmd => Command::Select {
            selector: take(&mut args),
            value: take(&mut args),
        },
        Rule::hover_cmd => Command::Hover {
            selector: take(&mut args),
        },
        Rule::check_cmd => Command::Check {
            selector: take(&mut args),
        },
        Rule::uncheck_cmd => Command::Uncheck {
            selector: take(&mut args),
        },
        Rule::wait_cmd => Command::Wait {
            selector: take(&mut args),
            timeout_ms,
        },
        Rule::screenshot_cmd => Command::Screenshot { name: args.next() },
        Rule::record_start_cmd => Command::RecordStart {
            name: take(&mut args),
        },
        Rule::record_stop_cmd => Command::RecordStop,
        Rule::status_cmd => Command::Status,
        Rule::generate_cmd => parse_generate(args)?,
        Rule::close_cmd => Command::Close,
        Rule::unknown_cmd => return Err(unknown(head.unwrap_or_default())),
        other => return Err(ParseError::UnknownRule(other)),
    };
    Ok(command)
}

/// `generate [framework] [language] [file]`, positionals in any order.
fn parse_generate(args: impl Iterator<Item = String>) -> Result<Command, ParseError> {
    let mut framework = None;
    let mut language = None;
    let mut file = None;

    for token in args {
        if framework.is_none()
            && let Ok(f) = token.parse::<Framework>()
        {
            framework = Some(f);
        } else if language.is_none()
            && let Ok(l) = token.parse::<Language>()
        {
            language = Some(l);
        } else if file.is_none() {
            file = Some(token);
        } else {
            return Err(ParseError::UnexpectedArgument(token));
        }
    }

    Ok(Command::Generate {
        framework,
        language,
        file,
    })
}

/// A line that fell through to `unknown_cmd`: either a misspelt command or a
/// known one with the wrong arguments.
fn unknown(word: String) -> ParseError {
    match usage(&word.to_ascii_lowercase()) {
        Some(line) => ParseError::Usage(line),
        None => ParseError::UnknownCommand(word),
    }
}

fn usage(keyword: &str) -> Option<&'static str> {
    let line = match keyword {
        "goto" | "navigate" => "goto <url>",
        "click" => "click <selector>",
        "fill" => "fill <selector> <value>",
        "type" => "type <selector> <text> [--delay <ms>]",
        "press" => "press <key>",
        "select" => "select <selector> <value>",
        "hover" => "hover <selector>",
        "check" => "check <selector>",
        "uncheck" => "uncheck <selector>",
        "wait" => "wait <selector> [--timeout <ms>]",
        "screenshot" => "screenshot [<name>]",
        "record" => "record start <name> | record stop",
        "status" => "status",
        "generate" => "generate [<framework>] [<language>] [<file>]",
        "close" => "close",
        _ => return None,
    };
    Some(line)
}

fn take(args: &mut impl Iterator<Item = String>) -> String {
    args.next().unwrap_or_default()
}

fn parse_value(pair: Pair<Rule>) -> String {
    // value = ${ !flag ~ (dq | sq | bare) }
    let Some(inner) = pair.into_inner().next() else {
        return String::new();
    };
    match inner.as_rule() {
        Rule::dq_inner => unescape(inner.as_str(), '"'),
        Rule::sq_inner => unescape(inner.as_str(), '\''),
        _ => inner.as_str().to_string(),
    }
}

/// Inside quotes only `\<quote>` and `\\` are escapes; other backslashes are
/// kept so CSS selectors survive.
fn unescape(raw: &str, quote: char) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && (next == quote || next == '\\')
        {
            out.push(next);
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

fn parse_millis(pair: Pair<Rule>, flag: &'static str) -> Result<u64, ParseError> {
    let raw = pair
        .into_inner()
        .find(|p| p.as_rule() == Rule::millis)
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();
    raw.parse()
        .map_err(|_| ParseError::InvalidNumber { flag, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        parse_command(line).unwrap().unwrap()
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(parse_command("# setup").unwrap(), None);
        assert_eq!(parse_command("#").unwrap(), None);
        assert_eq!(parse_command("## section").unwrap(), None);
    }

    #[test]
    fn test_hash_selector_is_not_a_comment() {
        assert_eq!(
            parse("click #submit # the big button"),
            Command::Click {
                selector: "#submit".into()
            }
        );
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(parse("STATUS"), Command::Status);
        assert_eq!(
            parse("Navigate a.test"),
            Command::Goto {
                url: "a.test".into()
            }
        );
    }

    #[test]
    fn test_quoted_arguments() {
        assert_eq!(
            parse(r#"fill "input[name='q']" 'hello world'"#),
            Command::Fill {
                selector: "input[name='q']".into(),
                value: "hello world".into()
            }
        );
        assert_eq!(
            parse(r#"fill #q "say \"hi\"""#),
            Command::Fill {
                selector: "#q".into(),
                value: "say \"hi\"".into()
            }
        );
        assert_eq!(
            parse(r#"fill #q """#),
            Command::Fill {
                selector: "#q".into(),
                value: String::new()
            }
        );
        assert_eq!(
            parse(r"click input[name=q]"),
            Command::Click {
                selector: "input[name=q]".into()
            }
        );
    }

    #[test]
    fn test_type_delay_flag_anywhere() {
        assert_eq!(
            parse("type --delay 40 #q rust"),
            Command::Type {
                selector: "#q".into(),
                text: "rust".into(),
                delay: Some(40)
            }
        );
        assert_eq!(
            parse("type #q rust --delay 5"),
            Command::Type {
                selector: "#q".into(),
                text: "rust".into(),
                delay: Some(5)
            }
        );
        assert!(matches!(
            parse_command("type #q rust --delay soon"),
            Err(ParseError::InvalidNumber { flag: "--delay", .. })
        ));
    }

    #[test]
    fn test_wait_timeout() {
        assert_eq!(
            parse("wait #app --timeout 2500"),
            Command::Wait {
                selector: "#app".into(),
                timeout_ms: Some(2500)
            }
        );
        assert!(matches!(
            parse_command("wait #q --timeout"),
            Err(ParseError::Usage(line)) if line.starts_with("wait")
        ));
    }

    #[test]
    fn test_record_subcommands() {
        assert_eq!(
            parse("record start \"login flow\""),
            Command::RecordStart {
                name: "login flow".into()
            }
        );
        assert_eq!(parse("record stop"), Command::RecordStop);
        assert!(matches!(
            parse_command("record pause"),
            Err(ParseError::Usage(line)) if line.starts_with("record")
        ));
        assert!(matches!(
            parse_command("record start"),
            Err(ParseError::Usage(_))
        ));
    }

    #[test]
    fn test_generate_positionals() {
        assert_eq!(
            parse("generate"),
            Command::Generate {
                framework: None,
                language: None,
                file: None
            }
        );
        assert_eq!(
            parse("generate py selenium out.py"),
            Command::Generate {
                framework: Some(Framework::Selenium),
                language: Some(Language::Python),
                file: Some("out.py".into())
            }
        );
        assert!(matches!(
            parse_command("generate pw ts a.ts b.ts"),
            Err(ParseError::UnexpectedArgument(arg)) if arg == "b.ts"
        ));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            parse_command("scroll down"),
            Err(ParseError::UnknownCommand(word)) if word == "scroll"
        ));
        assert!(matches!(
            parse_command("click"),
            Err(ParseError::Usage("click <selector>"))
        ));
        assert!(matches!(
            parse_command("click #a #b"),
            Err(ParseError::Usage("click <selector>"))
        ));
        assert!(matches!(
            parse_command("checkout #a"),
            Err(ParseError::UnknownCommand(_))
        ));
        assert!(matches!(
            parse_command("fill #q \"open"),
            Err(ParseError::Pest(_))
        ));
    }
}
