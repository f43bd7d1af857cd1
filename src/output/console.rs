//! Console output utilities.

use console::{style, StyledObject};

#[derive(Clone, Copy)]
enum Tag {
    Info,
    Success,
    Warning,
    Error,
}

impl Tag {
    fn styled(self) -> StyledObject<&'static str> {
        match self {
            Tag::Info => style("[*]").cyan().bold(),
            Tag::Success => style("[+]").green().bold(),
            Tag::Warning => style("[!]").yellow().bold(),
            Tag::Error => style("[x]").red().bold(),
        }
    }
}

fn tagged(tag: Tag, message: &str) -> String {
    format!("{} {}", tag.styled(), message)
}

pub fn print_info(message: &str) {
    println!("{}", tagged(Tag::Info, message));
}

pub fn print_success(message: &str) {
    println!("{}", tagged(Tag::Success, message));
}

pub fn print_warning(message: &str) {
    println!("{}", tagged(Tag::Warning, message));
}

/// Errors go to stderr.
pub fn print_error(message: &str) {
    eprintln!("{}", tagged(Tag::Error, message));
}

/// Print the program name and version.
pub fn print_banner() {
    println!(
        "{} {}",
        style("mys-downloader").magenta().bold(),
        style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
    );
    println!("{}", style("miyoushe post image downloader").dim());
    println!();
}

/// Print who is being downloaded and where to.
pub fn print_config_summary(uid: &str, user: &str, save_path: &str) {
    let rows = [("User ID", uid), ("Nickname", user), ("Save to", save_path)];

    println!();
    for (label, value) in rows {
        println!("  {} {}", style(format!("{:<10}", label)).bold(), value);
    }
    println!();
}
