use anyhow::Result;
use chrono::Local;
use std::env;
use std::process;

use expense_tracker::{CategoryTotal, Session, Store, TrackerError};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db_path = env::var("EXPENSES_DB").unwrap_or_else(|_| "expenses.db".to_string());

    let outcome = match args.get(1).map(String::as_str) {
        Some("register") => run_register(&db_path, &args[2..]),
        Some("categories") => run_categories(&db_path),
        Some("add") => run_add(&db_path, &args[2..]),
        Some("report") => run_report(&db_path, &args[2..]),
        _ => {
            usage();
            process::exit(2);
        }
    };

    // User-correctable rejections get a plain message, not an error chain
    if let Err(err) = outcome {
        match err.downcast_ref::<TrackerError>() {
            Some(e) if e.is_recoverable() => {
                eprintln!("{e}");
                process::exit(1);
            }
            _ => return Err(err),
        }
    }

    Ok(())
}

fn usage() {
    eprintln!("Usage: expense-tracker <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  register <username>");
    eprintln!("  categories");
    eprintln!("  add <username> <category> <amount> [date] [description]");
    eprintln!("  report <username> [--json]");
    eprintln!();
    eprintln!("The database path is taken from EXPENSES_DB (default: expenses.db).");
}

fn run_register(db_path: &str, args: &[String]) -> Result<()> {
    let Some(username) = args.first() else {
        usage();
        process::exit(2);
    };

    let password = rpassword::prompt_password("Password: ")?;
    let store = Store::open(db_path)?;
    store.register(username, &password)?;

    println!("Registered {username}. You can now log in.");
    Ok(())
}

fn run_categories(db_path: &str) -> Result<()> {
    let store = Store::open(db_path)?;
    for name in store.list_categories()? {
        println!("{name}");
    }
    Ok(())
}

fn login(store: &Store, username: &str) -> Result<Session> {
    let password = rpassword::prompt_password("Password: ")?;
    Ok(store.authenticate(username, &password)?)
}

fn run_add(db_path: &str, args: &[String]) -> Result<()> {
    let (Some(username), Some(category), Some(amount)) = (args.first(), args.get(1), args.get(2))
    else {
        usage();
        process::exit(2);
    };

    // Date defaults to today, like the entry form pre-fills it
    let today = Local::now().format("%Y-%m-%d").to_string();
    let date = args.get(3).map(String::as_str).unwrap_or(&today);
    let description = args.get(4).map(String::as_str).unwrap_or("");

    let store = Store::open(db_path)?;
    let session = login(&store, username)?;
    store.add_expense(session.user_id, category, amount, date, description)?;

    println!("Expense added: {category} {amount} on {date}");
    Ok(())
}

fn run_report(db_path: &str, args: &[String]) -> Result<()> {
    let Some(username) = args.first() else {
        usage();
        process::exit(2);
    };
    let as_json = args.iter().any(|a| a == "--json");

    let store = Store::open(db_path)?;
    let session = login(&store, username)?;
    let totals = store.summarize_by_category(session.user_id)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&totals)?);
        return Ok(());
    }

    if totals.is_empty() {
        println!("No expenses recorded yet.");
        return Ok(());
    }

    render_chart(&totals);
    Ok(())
}

/// Horizontal text bar chart, widest total scaled to 40 columns.
fn render_chart(totals: &[CategoryTotal]) {
    const BAR_WIDTH: f64 = 40.0;

    let max = totals.iter().map(|t| t.total.abs()).fold(0.0_f64, f64::max);
    let name_width = totals.iter().map(|t| t.category.len()).max().unwrap_or(0);

    for t in totals {
        let bar_len = if max > 0.0 {
            ((t.total.abs() / max) * BAR_WIDTH).round() as usize
        } else {
            0
        };
        println!(
            "{:<name_width$}  {:>10.2}  {}",
            t.category,
            t.total,
            "#".repeat(bar_len),
        );
    }
}
