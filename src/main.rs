//! Biblio - lending library management shell
//!
//! A thin interactive front end over the library core. All validation and
//! business rules live in the core; this binary only collects input and
//! renders results.

use std::io::{self, BufRead, Write};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblio_core::{config::AppConfig, repository::Repository, Library, LoanFilter};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("biblio_core={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Biblio v{}", env!("CARGO_PKG_VERSION"));

    let repository = Repository::new(&config.storage.data_dir);
    let mut library = Library::new(&config.library.name, repository);
    library.load()?;

    println!("{} — type 'help' for commands", library.name());
    run_shell(&mut library, config.loans.overdue_threshold_days)?;

    Ok(())
}

/// Read commands from stdin until `quit` or end of input.
fn run_shell(library: &mut Library, overdue_threshold_days: i64) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match command {
            "help" => print_help(),
            "quit" | "exit" => break,

            "add-book" => match fields(rest, 2) {
                Some(f) => {
                    let id = library.add_book(f[0], f[1]);
                    println!("ok: added book #{id}");
                }
                None => println!("usage: add-book <title>;<author>"),
            },
            "add-comic" => match fields(rest, 3) {
                Some(f) => {
                    let id = library.add_comic(f[0], f[1], f[2]);
                    println!("ok: added comic #{id}");
                }
                None => println!("usage: add-comic <title>;<writer>;<illustrator>"),
            },
            "add-dictionary" => match fields(rest, 2) {
                Some(f) => {
                    let id = library.add_dictionary(f[0], f[1]);
                    println!("ok: added dictionary #{id}");
                }
                None => println!("usage: add-dictionary <title>;<language>"),
            },
            "add-periodical" => match fields(rest, 1) {
                Some(f) => {
                    let id = library.add_periodical(f[0], f.get(1).copied());
                    println!("ok: added periodical #{id}");
                }
                None => println!("usage: add-periodical <title>[;<YYYY-MM-DD>]"),
            },
            "add-member" => match fields(rest, 2) {
                Some(f) => match library.register_member(f[0], f[1], f.get(2).copied()) {
                    Ok(id) => println!("ok: registered member #{id}"),
                    Err(e) => println!("error: {e}"),
                },
                None => println!("usage: add-member <lastName>;<firstName>[;<contact>]"),
            },

            "remove-document" => match rest.parse() {
                Ok(id) => {
                    if library.remove_document(id) {
                        println!("ok: document #{id} removed");
                    } else {
                        println!("error: document {id} not found");
                    }
                }
                Err(_) => println!("usage: remove-document <id>"),
            },
            "remove-member" => match rest.parse() {
                Ok(id) => {
                    if library.remove_member(id) {
                        println!("ok: member #{id} removed");
                    } else {
                        println!("error: member {id} not found");
                    }
                }
                Err(_) => println!("usage: remove-member <id>"),
            },

            "documents" => {
                for doc in library.documents() {
                    println!("{doc}");
                }
            }
            "books" => {
                for book in library.available_books() {
                    println!("{book}");
                }
            }
            "members" => {
                for member in library.members() {
                    println!("{member}");
                }
            }
            "loans" => {
                let filter = match rest {
                    "open" => LoanFilter::Open,
                    "closed" => LoanFilter::Closed,
                    _ => LoanFilter::All,
                };
                for loan in library.loans(filter) {
                    println!("{loan}");
                }
            }
            "overdue" => {
                let threshold = rest.parse().unwrap_or(overdue_threshold_days);
                for loan in library.overdue_loans(threshold) {
                    println!("{loan}");
                }
            }

            "borrow" => match two_ids(rest) {
                Some((member_id, item_id)) => match library.create_loan(member_id, item_id) {
                    Ok(id) => println!("ok: loan #{id} opened"),
                    Err(e) => println!("error: {e}"),
                },
                None => println!("usage: borrow <memberId> <itemId>"),
            },
            "return" => match rest.parse() {
                Ok(id) => match library.return_loan(id) {
                    Ok(()) => println!("ok: loan #{id} closed"),
                    Err(e) => println!("error: {e}"),
                },
                Err(_) => println!("usage: return <loanId>"),
            },

            "stats" => {
                let stats = library.stats(overdue_threshold_days);
                println!(
                    "{} documents, {} members, {} open loans ({} overdue)",
                    stats.documents, stats.members, stats.open_loans, stats.overdue_loans
                );
            }
            "save" => match library.save() {
                Ok(()) => println!("ok: saved"),
                Err(e) => println!("error: {e}"),
            },

            other => println!("unknown command '{other}' — type 'help'"),
        }
    }

    Ok(())
}

/// Split `;`-separated fields, requiring at least `min` of them.
fn fields(rest: &str, min: usize) -> Option<Vec<&str>> {
    if rest.is_empty() {
        return None;
    }
    let parts: Vec<&str> = rest.split(';').map(str::trim).collect();
    (parts.len() >= min).then_some(parts)
}

fn two_ids(rest: &str) -> Option<(i32, i32)> {
    let (a, b) = rest.split_once(' ')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

fn print_help() {
    println!(
        "\
commands:
  add-book <title>;<author>
  add-comic <title>;<writer>;<illustrator>
  add-dictionary <title>;<language>
  add-periodical <title>[;<YYYY-MM-DD>]
  add-member <lastName>;<firstName>[;<contact>]
  remove-document <id>      remove-member <id>
  documents                 list every catalogued item
  books                     list available books
  members                   list registered members
  borrow <memberId> <itemId>
  return <loanId>
  loans [all|open|closed]
  overdue [days]
  stats
  save
  quit"
    );
}
