use owo_colors::OwoColorize;

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Per-file outcome line from a run. Errors and skips are tinted so they stand
/// out in a long batch; the text itself is unchanged for scripts.
pub fn print_run_line(msg: &str) {
    if !is_tty() {
        println!("{}", msg);
    } else if msg.starts_with("Error") {
        println!("{}", msg.red());
    } else if msg.starts_with("Skipped") {
        println!("{}", msg.dimmed());
    } else {
        println!("{}", msg);
    }
}

/// Print a plain user-facing line (no prefix), e.g. one path per line for `--list`.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}
