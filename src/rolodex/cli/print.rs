use colored::Colorize;
use rolodex::api::{CmdMessage, MessageLevel, StoredBook};

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

/// Pages one after another, separated by a blank line.
pub(super) fn print_pages(pages: &[String]) {
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", page);
    }
}

/// One owner per line, the open book in bold.
pub(super) fn print_books(books: &[StoredBook]) {
    for book in books {
        if book.open {
            println!("{}", book.owner.bold());
        } else {
            println!("{}", book.owner);
        }
    }
}
