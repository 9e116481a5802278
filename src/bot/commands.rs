/// Text commands understood by the bot.
///
/// Matching is literal: `!roll` must be the whole message, `!purge` and
/// `!note` only need to prefix it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Post a dice prompt with d4/d6/d8/d20 buttons
    Roll,

    /// Delete recent messages - Usage: !purge <1-100>
    ///
    /// Holds the parsed count, or `None` when no number could be read.
    Purge(Option<i64>),

    /// Forward a note to the notes channel - Usage: !note <text>
    ///
    /// Holds the trimmed text, possibly empty.
    Note(String),
}

const ROLL: &str = "!roll";
const PURGE: &str = "!purge";
const NOTE: &str = "!note";

impl Command {
    pub fn parse(content: &str) -> Option<Self> {
        if content == ROLL {
            Some(Command::Roll)
        } else if content.starts_with(PURGE) {
            let amount = content.split(' ').nth(1).and_then(parse_leading_int);
            Some(Command::Purge(amount))
        } else if let Some(rest) = content.strip_prefix(NOTE) {
            Some(Command::Note(rest.trim().to_string()))
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Roll => ROLL,
            Command::Purge(_) => PURGE,
            Command::Note(_) => NOTE,
        }
    }

    /// Reply used when the command fails for reasons outside the user's control.
    pub fn failure_notice(&self) -> &'static str {
        match self {
            Command::Roll => "❌ Could not create the dice roller.",
            Command::Purge(_) => "❌ There was an error trying to delete messages.",
            Command::Note(_) => {
                "❌ Could not send note. Please check permissions or channel settings."
            }
        }
    }
}

/// Reads an optional sign followed by leading digits, ignoring anything after
/// them. `"12abc"` is 12, `"abc"` is `None`.
fn parse_leading_int(token: &str) -> Option<i64> {
    let token = token.trim_start();
    let (negative, digits) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}
