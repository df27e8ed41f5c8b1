use env_logger::Env;

mod cli;

#[tokio::main]
async fn main() {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if let Err(err) = cli::Cli::handle().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
