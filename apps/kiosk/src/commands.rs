//! Text commands typed at the kiosk terminal.

use kiosk_core::{CardForm, Screen, UserAction};

pub const HELP: &str = "\
commands:
  enter | scan              choose manual entry or the QR scanner
  code <text>               submit a code id
  manual | rescan | reset   scanner fallback, retry camera, re-arm scanner
  remove <n> | less <n>     drop line n or take one tablet off it (1-based)
  proceed                   go to payment
  pay <card>|<name>|<MM/YY>|<cvv>
  retry                     retry a failed payment
  home                      back to the start screen
  goto <screen>             open a screen directly (e.g. goto /payment)
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Action(UserAction),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let action = match verb.to_ascii_lowercase().as_str() {
        "" | "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        "enter" => UserAction::ChooseManualEntry,
        "scan" => UserAction::ChooseQrScan,
        "manual" => UserAction::ShowManualFallback,
        "rescan" => UserAction::RetryScanner,
        "reset" => UserAction::ResetScanner,
        "code" => UserAction::SubmitCode(rest.to_string()),
        "remove" => UserAction::RemoveMedicine(line_index(rest)?),
        "less" => UserAction::DecreaseMedicine(line_index(rest)?),
        "proceed" => UserAction::ProceedToPayment,
        "pay" => UserAction::SubmitPayment(card_form(rest)?),
        "retry" => UserAction::RetryPayment,
        "home" => UserAction::GoHome,
        "goto" => UserAction::Navigate(rest.parse::<Screen>().map_err(|e| e.to_string())?),
        other => return Err(format!("unknown command '{other}', type 'help'")),
    };
    Ok(Command::Action(action))
}

fn line_index(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("expected a line number starting at 1, got '{raw}'")),
    }
}

fn card_form(raw: &str) -> Result<CardForm, String> {
    let parts: Vec<&str> = raw.split('|').collect();
    let [card_number, cardholder_name, expiry, cvv] = parts.as_slice() else {
        return Err("usage: pay <card>|<name>|<MM/YY>|<cvv>".into());
    };
    Ok(CardForm {
        card_number: card_number.to_string(),
        cardholder_name: cardholder_name.to_string(),
        expiry: expiry.trim().to_string(),
        cvv: cvv.trim().to_string(),
    })
}
