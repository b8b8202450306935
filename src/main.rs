use clap::Parser;
use igchecker::{CheckerError, Cli, FollowChecker, OutputFormatter, OutputMode, UserFriendlyError};
use std::path::PathBuf;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let checker = match FollowChecker::from_cli(&cli) {
        Ok(checker) => checker,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    // clap enforces both paths unless --generate-config was given
    let (Some(followers), Some(following)) = (cli.followers.as_ref(), cli.following.as_ref()) else {
        checker
            .output_formatter()
            .error("Both the followers and the following export are required");
        return 2;
    };

    match checker.analyze(followers, following) {
        Ok(report) => {
            checker.print_report(&report);
            0
        }
        Err(e) => {
            checker.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &CheckerError) -> i32 {
    match error {
        CheckerError::InvalidPath { .. } => 2,
        CheckerError::MalformedInput { .. } => 3,
        CheckerError::OutputFileExists { .. } => 4,
        CheckerError::Permission { .. } => 5,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("igchecker.toml"));

    if config_path.exists() {
        eprintln!(
            "Refusing to overwrite existing configuration file: {}",
            config_path.display()
        );
        return 4;
    }

    match FollowChecker::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path.display());
            println!("\nTo use this configuration:");
            println!(
                "  igchecker followers_1.json following.json --config {}",
                config_path.display()
            );
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &CheckerError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
