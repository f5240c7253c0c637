//! Interactive command parser for the swipe loop

use lazy_static::lazy_static;
use regex::Regex;
use crate::types::{SubscriptionTier, SwipeDirection};

lazy_static! {
    static ref RE_SWIPE: Regex = Regex::new(r"(?i)^(left|l|pass|nope|right|r|like)$").unwrap();
    static ref RE_REWIND: Regex = Regex::new(r"(?i)^(rewind|undo|u)$").unwrap();
    static ref RE_CRUSH: Regex = Regex::new(r"(?i)^(crush|c|super)$").unwrap();
    static ref RE_BOOST: Regex = Regex::new(r"(?i)^(boost|b)$").unwrap();
    static ref RE_TIER: Regex = Regex::new(r"(?i)^(?:tier|upgrade|plan)\s+(\w+)$").unwrap();
    static ref RE_STATUS: Regex = Regex::new(r"(?i)^(status|s)$").unwrap();
    static ref RE_MATCHES: Regex = Regex::new(r"(?i)^(matches|m)$").unwrap();
    static ref RE_HELP: Regex = Regex::new(r"(?i)^(help|h|\?)$").unwrap();
    static ref RE_QUIT: Regex = Regex::new(r"(?i)^(quit|exit|q)$").unwrap();
}

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Swipe(SwipeDirection),
    Rewind,
    Crush,
    Boost,
    Tier(SubscriptionTier),
    Status,
    Matches,
    Help,
    Quit,
    /// Anything unparseable, kept for the error message
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim();

        if RE_SWIPE.is_match(line) {
            return match line.parse() {
                Ok(direction) => Command::Swipe(direction),
                Err(_) => Command::Unknown(line.to_string()),
            };
        }
        if let Some(caps) = RE_TIER.captures(line) {
            return match caps[1].parse() {
                Ok(tier) => Command::Tier(tier),
                Err(_) => Command::Unknown(line.to_string()),
            };
        }

        if RE_REWIND.is_match(line) {
            Command::Rewind
        } else if RE_CRUSH.is_match(line) {
            Command::Crush
        } else if RE_BOOST.is_match(line) {
            Command::Boost
        } else if RE_STATUS.is_match(line) {
            Command::Status
        } else if RE_MATCHES.is_match(line) {
            Command::Matches
        } else if RE_HELP.is_match(line) {
            Command::Help
        } else if RE_QUIT.is_match(line) {
            Command::Quit
        } else {
            Command::Unknown(line.to_string())
        }
    }
}

pub const HELP: &str = "\
Commands:
  left | l        pass on the current profile
  right | r       like the current profile
  crush | c       send a crush (premium, limited)
  rewind | u      bring back the last profile
  boost | b       boost your profile (once per session)
  tier <name>     switch plan: free, plus, sapphire
  status | s      show session state
  matches | m     list mutual matches
  quit | q        leave";
