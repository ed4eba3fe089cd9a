//! Rendered texts sent over the wire.
//!
//! Broadcast texts here are un-stamped; the hub adds the `[HH:MM]` prefix.
//! None of them carry a trailing newline, the connection writer appends it.

use super::value_object::DisplayName;

/// Lines returned by `/help`
pub const HELP_COMMANDS: [&str; 5] = [
    "/list - lists all online users",
    "/msg <send_to> <message> - send private message",
    "/nickname <nick_name> - change nickname",
    "/me <action> - just for fun, inform other users what you are doing",
    "/quit - leave the chat",
];

pub const INVALID_NICKNAME: &str =
    "Invalid nickname. Use 3 to 16 chars: letters, digits, or underscores only.";

pub fn joined(name: &DisplayName) -> String {
    format!("{name} has joined the chat")
}

pub fn left(name: &DisplayName) -> String {
    format!("{name} has left the chat")
}

pub fn says(name: &DisplayName, text: &str) -> String {
    format!("{name} says: {text}")
}

pub fn action(name: &DisplayName, action: &str) -> String {
    format!("* {name} {action}")
}

pub fn nickname_changed(old: &DisplayName, new: &DisplayName) -> String {
    format!("User changed nick name {old} -> {new}")
}

/// Line delivered to the recipient of a private message
pub fn private_from(timestamp: &str, sender: &DisplayName, text: &str) -> String {
    format!("{timestamp}[PM from {sender}]: {text}")
}

/// Confirmation echoed back to the sender of a private message
pub fn private_to(timestamp: &str, recipient: &DisplayName, text: &str) -> String {
    format!("{timestamp}[PM to {recipient}]: {text}")
}

pub fn online_users(names: &[DisplayName]) -> String {
    let mut payload = String::from("Online users:");
    for name in names {
        payload.push('\n');
        payload.push_str(name.as_str());
    }
    payload
}

pub fn help() -> String {
    format!("Available commands:\n{}", HELP_COMMANDS.join("\n"))
}

pub fn user_not_found(name: &str) -> String {
    format!("User '{name}' not found.")
}

pub fn nickname_taken(name: &str) -> String {
    format!("Nickname {name} is already taken")
}

pub fn line_too_long(max_length: usize) -> String {
    format!("Line too long (max {max_length} bytes).")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_broadcast_texts() {
        let alice = name("alice");
        assert_eq!(joined(&alice), "alice has joined the chat");
        assert_eq!(left(&alice), "alice has left the chat");
        assert_eq!(says(&alice, "hi everyone"), "alice says: hi everyone");
        assert_eq!(action(&alice, "waves"), "* alice waves");
        assert_eq!(
            nickname_changed(&alice, &name("alicia")),
            "User changed nick name alice -> alicia"
        );
    }

    #[test]
    fn test_private_message_texts() {
        assert_eq!(
            private_from("[12:34]", &name("bob"), "hello"),
            "[12:34][PM from bob]: hello"
        );
        assert_eq!(
            private_to("[12:34]", &name("alice"), "hello"),
            "[12:34][PM to alice]: hello"
        );
    }

    #[test]
    fn test_online_users_lists_one_name_per_line() {
        let names = vec![name("alice"), name("bob")];
        assert_eq!(online_users(&names), "Online users:\nalice\nbob");
        assert_eq!(online_users(&[]), "Online users:");
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = help();
        assert!(help.starts_with("Available commands:\n"));
        for command in HELP_COMMANDS {
            assert!(help.contains(command));
        }
    }
}
