use colored::Colorize;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), err);

    let msg = err.to_string().to_lowercase();

    if msg.contains("connection refused") || msg.contains("transport error") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Check that the backend is running and reachable:");
        eprintln!("  {} credscope --server http://host:8080", "$".dimmed());
    }

    if msg.contains("no such file") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Check the file path and try again.");
    }

    std::process::exit(1);
}
