//! Interactive prompt loop.
//!
//! Plain lines go to the model; lines starting with `/` are local commands
//! operating on the session and the file store.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use companion_chat::ChatSession;
use companion_vfs::{Entry, EntryKind};

const HELP: &str = "\
Commands:
  /tree            Show the project file tree
  /open <path>     Print a file's content
  /log             Show the console log
  /restore <n>     Restore the checkpoint of the n-th message
  /clear           Reset the conversation (files are kept)
  /help            Show this help
  /quit            Exit";

pub async fn run(session: &mut ChatSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}", session.messages().last().map(|m| m.text.as_str()).unwrap_or_default());
    println!("{}", HELP);

    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.split_once(' ').map_or((line, ""), |(c, rest)| (c, rest.trim())) {
            ("/quit", _) | ("/exit", _) => break,
            ("/help", _) => println!("{}", HELP),
            ("/tree", _) => print_tree(session.store().entries()),
            ("/open", path) => match session.store().find_by_path(path) {
                Some(entry) if entry.kind == EntryKind::File => println!("{}", entry.content),
                Some(_) => eprintln!("{} is a folder", path),
                None => eprintln!("No such file: {}", path),
            },
            ("/log", _) => {
                for message in session.store().console().messages() {
                    println!(
                        "[{}] {:?}: {}",
                        message.timestamp.format("%H:%M:%S"),
                        message.level,
                        message.message
                    );
                }
            }
            ("/restore", index) => restore(session, index),
            ("/clear", _) => {
                session.reset_conversation();
                println!("Conversation cleared.");
            }
            _ if line.starts_with('/') => eprintln!("Unknown command; try /help"),
            _ => {
                let reply = session.send_message(line, None).await?;
                println!("\n{}", reply.text);
                if let Some(applied) = &reply.operations_applied {
                    for operation in applied {
                        println!("  * {:?} {}", operation.action, operation.path);
                    }
                }
                if let Some(seconds) = reply.processing_time {
                    println!("  ({:.1}s)", seconds);
                }
            }
        }
    }
    Ok(())
}

fn print_tree(entries: &[Entry]) {
    if entries.is_empty() {
        println!("(empty project)");
        return;
    }
    let mut paths: Vec<&Entry> = entries.iter().collect();
    paths.sort_by(|a, b| a.path.cmp(&b.path));
    for entry in paths {
        let marker = if entry.kind == EntryKind::Folder { "/" } else { "" };
        println!("{}{}", entry.path, marker);
    }
}

fn restore(session: &mut ChatSession, index: &str) {
    let index: usize = match index.parse() {
        Ok(index) => index,
        Err(_) => {
            eprintln!("Usage: /restore <message number>");
            return;
        }
    };
    let Some(message) = session.messages().get(index) else {
        eprintln!("No message #{}", index);
        return;
    };
    let id = message.id.clone();
    match session.restore_checkpoint(&id) {
        Ok(()) => println!("Restored checkpoint from message #{}", index),
        Err(e) => eprintln!("{}", e),
    }
}
