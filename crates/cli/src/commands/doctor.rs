use crossterm::style::Stylize;

pub fn execute() {
    println!(
        "{}",
        "Hello! I'm envdoctor. How can I help you today?".magenta()
    );
    println!("{}", "Try running: envdoctor scan".cyan());
}
