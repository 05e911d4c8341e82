use log::{debug, error, info, warn};
use std::io::{self, Write};
use std::process;

use pantry_chef::config::load_env_file;
use pantry_chef::{read_user_line, render_outcome, AppConfig, Credentials, PantryChef};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before the logger so it may set RUST_LOG
    let dotenv = load_env_file(None);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match dotenv {
        Ok(Some(path)) => debug!("Loaded environment from {}", path.display()),
        // A missing .env file is fine; the variables may already be exported
        Ok(None) => {}
        Err(e) => warn!("Ignoring unreadable .env file: {}", e),
    }

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("Error configuring API credentials: {}", e);
            eprintln!("If using a .env file, ensure it's in the project root.");
            process::exit(1);
        }
    };

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };
    info!("Loaded configuration: {:?}", config);

    let chef = PantryChef::from_config(&credentials, &config)?;

    println!("Welcome to the Pantry Chef!");
    print!("Please tell me what ingredients you have at home: \n> ");
    io::stdout().flush()?;

    let user_input = read_user_line(&mut io::stdin().lock())?;

    let mut stdout = io::stdout();
    let result = chef.run(&user_input, &mut stdout).await;
    if let Err(e) = &result {
        error!("{}", e);
    }
    render_outcome(&result, &mut stdout)?;

    Ok(())
}
