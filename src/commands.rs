//! One-shot CLI commands (print to stdout)
//!
//! Each command builds its own state from the seed data; nothing is kept
//! between invocations.

use anyhow::Result;

use crate::config::Config;
use crate::i18n::{Catalog, Translate};
use crate::models::{filter_by_name, seed, CallType, ContactStatus, Direction, Message};
use crate::notice::Notice;
use crate::preferences::Preference;
use crate::session::{ChatSession, TypingTimings};

/// List discussions, optionally filtered by name.
pub fn list_chats(tr: &dyn Translate, search: Option<&str>) -> Result<()> {
    let conversations = seed::conversations();
    let hits = filter_by_name(&conversations, search.unwrap_or(""));

    println!("\n{}:", tr.t("discussions.title"));
    println!("{:-<60}", "");

    if hits.is_empty() {
        println!("  {}", tr.t("discussions.empty"));
        println!("  {}", tr.t("discussions.emptySubtext"));
        return Ok(());
    }

    for conv in hits {
        let group = if conv.is_group { " [group]" } else { "" };
        let online = if conv.is_online { " *" } else { "" };
        println!("{} {}{}{}", conv.avatar, conv.name, group, online);
        println!("  ID: {}", conv.id);
        println!("  Last: {} ({})", conv.last_message, conv.timestamp);
        if conv.unread_count > 0 {
            println!("  Unread: {}", conv.unread_count);
        }
        println!();
    }

    Ok(())
}

/// Print the call history.
pub fn list_calls(tr: &dyn Translate) -> Result<()> {
    let calls = seed::calls();

    println!("\n{}:", tr.t("calls.title"));
    println!("{:-<60}", "");

    if calls.is_empty() {
        println!("  {}", tr.t("calls.empty"));
        return Ok(());
    }

    for call in &calls {
        let kind = match call.call_type {
            CallType::Audio => tr.t("chat.audioType"),
            CallType::Video => tr.t("chat.videoType"),
        };
        let duration = call
            .duration
            .as_deref()
            .map(|d| format!(" - {}", d))
            .unwrap_or_default();
        println!(
            "{} {:<24} {} {}{} ({})",
            call.avatar,
            call.name,
            call.direction.marker(),
            call.timestamp,
            duration,
            kind
        );
    }

    Ok(())
}

/// List contacts, optionally filtered by name.
pub fn list_contacts(tr: &dyn Translate, search: Option<&str>) -> Result<()> {
    let contacts = seed::contacts();
    let hits = filter_by_name(&contacts, search.unwrap_or(""));

    println!("\n{}:", tr.t("contacts.title"));
    println!("{:-<60}", "");

    if hits.is_empty() {
        println!("  {}", tr.t("contacts.empty"));
        return Ok(());
    }

    for contact in hits {
        let dot = match contact.status {
            ContactStatus::Online => "*",
            ContactStatus::Away => "~",
            ContactStatus::Offline => "o",
        };
        println!(
            "{} {} {:<20} {}",
            dot, contact.avatar, contact.name, contact.last_seen
        );
    }

    Ok(())
}

fn print_message(msg: &Message, peer: &str) {
    let (sender, mark) = match msg.direction() {
        Direction::Sent if msg.is_read() => ("me", " ✓✓"),
        Direction::Sent => ("me", " ✓"),
        Direction::Received => (peer, ""),
    };
    println!("[{}] {}: {}{}", msg.time_label(), sender, msg.text(), mark);
}

/// Print the opening transcript of a conversation.
pub fn read_messages(conversation_id: &str, timings: TypingTimings) -> Result<()> {
    let conversations = seed::conversations();
    let session = ChatSession::open(&conversations, conversation_id, timings)?;

    println!("\n{} ({})", session.peer_name(), session.conversation_id());
    println!("{:-<60}", "");
    for msg in session.messages() {
        print_message(msg, session.peer_name());
    }
    session.close();

    Ok(())
}

/// Send one message into a fresh session and print the transcript.
///
/// With `wait`, stay until the simulated peer stops typing.
pub async fn send_message(
    tr: &dyn Translate,
    conversation_id: &str,
    message: &str,
    timings: TypingTimings,
    wait: bool,
) -> Result<()> {
    let conversations = seed::conversations();
    let mut session = ChatSession::open(&conversations, conversation_id, timings)?;
    let mut typing = session.subscribe_typing();

    if session.send_message(message).is_none() {
        println!("Nothing to send (empty message)");
        return Ok(());
    }

    println!("\n{}", session.peer_name());
    println!("{:-<60}", "");
    for msg in session.messages() {
        print_message(msg, session.peer_name());
    }

    if wait {
        let typing_line = tr.translate("chat.typing", &[("name", session.peer_name())]);
        while typing.changed().await.is_ok() {
            let visible = *typing.borrow_and_update();
            if visible {
                println!("{}...", typing_line);
            } else {
                break;
            }
        }
    }

    session.close();
    Ok(())
}

/// Print the notice a call button would show.
pub fn call(tr: &dyn Translate, name: &str, video: bool) -> Result<()> {
    let call_type = if video {
        CallType::Video
    } else {
        CallType::Audio
    };
    print_notice(&Notice::history_call(tr, name, call_type));
    Ok(())
}

fn print_notice(notice: &Notice) {
    println!("\n{}", notice.title);
    println!("{:-<60}", "");
    println!("{}", notice.body);
}

/// Print the settings toggles as they start out.
pub fn show_settings(tr: &dyn Translate, config: &Config) -> Result<()> {
    println!("\n{}:", tr.t("settings.title"));
    println!("{:-<60}", "");
    for pref in Preference::ALL {
        let state = if config.preferences.get(pref) {
            tr.t("settings.on")
        } else {
            tr.t("settings.off")
        };
        let title = tr.t(&format!("settings.items.{}", pref.key()));
        println!("  {:<32} {}", title, state);
    }
    Ok(())
}

/// Print where the config file lives and the effective values.
pub fn show_config(config: &Config, catalog: &Catalog) -> Result<()> {
    println!("Config file: {}", Config::config_path()?.display());
    println!(
        "Locale: {} (available: {})",
        catalog.locale(),
        catalog.available_locales().join(", ")
    );
    println!(
        "Typing indicator: {} ms delay, {} ms visible",
        config.typing_delay_ms, config.typing_clear_ms
    );
    if let Some(ref name) = config.user_name {
        println!("User name: {}", name);
    }
    Ok(())
}
