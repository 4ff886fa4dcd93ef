#[tokio::main]
async fn main() -> selectbot::error::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("selectbot=info"))
        .init();
    log::info!("Starting selectbot");

    match selectbot::run().await {
        Ok(()) => {
            log::info!("Bot shut down successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Bot encountered an error: {}", e);
            Err(e)
        }
    }
}
