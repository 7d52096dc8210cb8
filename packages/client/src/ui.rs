//! UI utilities for the client.

use std::io::Write;

/// Print a line above the prompt and redisplay the prompt
pub fn print_above_prompt(line: &str, user_name: &str) {
    println!("\n{}", line);
    redisplay_prompt(user_name);
}

/// Redisplay the prompt after printing output
pub fn redisplay_prompt(user_name: &str) {
    print!("{}> ", user_name);
    std::io::stdout().flush().ok();
}
