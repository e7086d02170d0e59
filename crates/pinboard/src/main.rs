//! A terminal front-end for the map-and-chat assistant.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use pinboard::model::{MarkerCategory, Message, Role};
use pinboard::{Session, SessionBuilder};
use tokio::io::{self, AsyncBufReadExt};
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::interval;

const BAR_CHAR: &str = "▎";

enum Command<'a> {
    Say(&'a str),
    Map,
    Back(&'a str),
    Reload,
    Help,
    Quit,
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
        match head {
            "/map" => Command::Map,
            "/back" => Command::Back(rest.trim()),
            "/reload" => Command::Reload,
            "/help" => Command::Help,
            "/quit" | "/exit" => Command::Quit,
            _ => Command::Say(line),
        }
    }

    /// Whether the assistant will answer this command. The prompt then
    /// waits for the reply, since the engine only starts composing once
    /// it has handled the input.
    fn awaits_reply(&self) -> bool {
        matches!(self, Command::Say(text) if !text.is_empty())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (message_tx, mut message_rx) = mpsc::unbounded_channel::<Message>();

    let session = SessionBuilder::new()
        .on_message(move |msg| {
            message_tx.send(msg.clone()).ok();
        })
        .build();
    let mut session = match session {
        Ok(session) => session,
        Err(err) => {
            eprintln!("failed to load the map data: {err}");
            return;
        }
    };

    for msg in session.transcript().await {
        print_message(&msg);
    }
    if let Ok(query) = env::var("PINBOARD_QUERY") {
        session.return_from(&query);
    }

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let mut progress_bar: Option<ProgressBar> = None;
    let mut ticker = interval(Duration::from_millis(100));

    let mut lines = io::BufReader::new(io::stdin()).lines();
    prompt();

    loop {
        select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(err) => {
                        error!("error reading input: {err}");
                        break;
                    }
                };
                let command = Command::parse(&line);
                let awaits_reply = command.awaits_reply();
                match command {
                    Command::Say(text) => session.send_message(text),
                    Command::Map => print_map(&mut session),
                    Command::Back(query) => session.return_from(query),
                    Command::Reload => {
                        session.reload().await;
                        println!("{}", "── reloaded ──".dimmed());
                        for msg in session.transcript().await {
                            print_message(&msg);
                        }
                    }
                    Command::Help => print_help(),
                    Command::Quit => break,
                }
                if !awaits_reply && !session.is_composing() {
                    prompt();
                }
            }
            msg = message_rx.recv() => {
                let Some(msg) = msg else {
                    break;
                };
                if let Some(progress_bar) = progress_bar.take() {
                    progress_bar.finish_and_clear();
                }
                // User messages are already on screen as typed input.
                if msg.role == Role::Assistant {
                    print_message(&msg);
                    if session.sync_markers() {
                        print_map(&mut session);
                    }
                    if !session.is_composing() {
                        prompt();
                    }
                }
            }
            _ = ticker.tick() => {
                if session.is_composing() {
                    progress_bar
                        .get_or_insert_with(|| {
                            let progress_bar = ProgressBar::new_spinner();
                            progress_bar.set_style(progress_style.clone());
                            progress_bar.set_message("Thinking...");
                            progress_bar
                        })
                        .inc(1);
                }
            }
        }
    }
}

fn prompt() {
    print!("> ");
    std::io::stdout().flush().ok();
}

fn print_message(msg: &Message) {
    match msg.role {
        Role::User => {
            println!("{}{}", BAR_CHAR.bright_blue(), msg.content.bright_white());
        }
        Role::Assistant => {
            let bar = BAR_CHAR.bright_cyan();
            println!("{bar}🤖 {}", msg.content.bright_white());
            for card in &msg.cards {
                println!(
                    "{bar}   {} {} · {}",
                    "•".bright_green(),
                    card.name.bold(),
                    card.category.dimmed()
                );
                println!("{bar}     ★ {}", card.reputation);
                println!("{bar}     {}", card.global_history.dimmed());
                println!("{bar}     {}  {}", card.pricing, card.address.dimmed());
            }
        }
    }
}

fn print_map(session: &mut Session) {
    session.sync_markers();
    println!("{}", "── map ──".dimmed());
    let legend: Vec<_> = MarkerCategory::LEGEND
        .iter()
        .map(|category| format!("{} {}", category.as_str(), MarkerCategory::color(*category)))
        .collect();
    println!("{}", legend.join("  ").dimmed());
    for styled in session.board().styled() {
        let marker = styled.marker;
        let dot = if styled.emphasized { "◉" } else { "○" };
        let line = format!(
            "{dot} {:<40} {:<12} ({:.4}, {:.4})",
            marker.title,
            marker.category.as_str(),
            marker.position.lat,
            marker.position.lng
        );
        if styled.emphasized {
            println!("{}", line.bright_green().bold());
        } else {
            println!("{line}");
        }
    }
}

fn print_help() {
    println!("Type anything to chat. Commands:");
    println!("  /map            show markers on the map");
    println!("  /back <query>   return from a detail page, e.g. /back from=service&reserved=true");
    println!("  /reload         reload the page, keeping the session");
    println!("  /quit           leave");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_chat_lines_await_a_reply() {
        assert!(Command::parse("hello").awaits_reply());
        assert!(Command::parse("  I need a cook ").awaits_reply());
        assert!(!Command::parse("   ").awaits_reply());
        assert!(!Command::parse("").awaits_reply());
        assert!(!Command::parse("/map").awaits_reply());
        assert!(!Command::parse("/back from=service&reserved=true").awaits_reply());
        assert!(!Command::parse("/reload").awaits_reply());
    }
}
