//! Terminal commands.

use domain::PaymentMethod;
use thiserror::Error;

/// A line typed into the terminal front end.
///
/// Products are addressed by their 1-based position: catalog position for
/// `show`/`toggle`, basket row for `remove`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Show(usize),
    Toggle(usize),
    Basket,
    Remove(usize),
    Checkout,
    Payment(PaymentMethod),
    Address(String),
    Email(String),
    Phone(String),
    Submit,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("{0}")]
    InvalidPayment(String),
}

pub const HELP: &str = "\
Commands:
  list                 show the catalog
  show <n>             preview product n
  toggle <n>           buy or remove product n
  basket               show the basket
  remove <n>           remove basket row n
  checkout             start checkout
  payment <online|on delivery>
  address <text>
  email <text>
  phone <text>
  submit               place the order
  help
  quit";

fn position(command: &'static str, arg: &str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            expected: "a position",
        });
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::InvalidPosition(arg.to_string())),
    }
}

impl std::str::FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        match name.to_lowercase().as_str() {
            "list" | "ls" => Ok(Command::List),
            "show" => position("show", arg).map(Command::Show),
            "toggle" | "buy" => position("toggle", arg).map(Command::Toggle),
            "basket" => Ok(Command::Basket),
            "remove" | "rm" => position("remove", arg).map(Command::Remove),
            "checkout" => Ok(Command::Checkout),
            "payment" => {
                if arg.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "payment",
                        expected: "online or on delivery",
                    });
                }
                arg.parse()
                    .map(Command::Payment)
                    .map_err(CommandError::InvalidPayment)
            }
            // Empty values are meaningful here: they trigger validation errors.
            "address" => Ok(Command::Address(arg.to_string())),
            "email" => Ok(Command::Email(arg.to_string())),
            "phone" => Ok(Command::Phone(arg.to_string())),
            "submit" => Ok(Command::Submit),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
