/// Locus Links - reference resolution service
///
/// Serves locality decisions, route paths and API addresses for authors
/// and entries of a federated social node.

use locus_links::{context::AppContext, error::LinkResult, server, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> LinkResult<()> {
    // Load configuration
    let config = ServerConfig::from_env()?;

    // Initialize logging, RUST_LOG overrides LOCUS_LOG_LEVEL
    tracing_subscriber::registry()
        .with(config.logging.env_filter()?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    print_banner();

    // Create application context
    let ctx = AppContext::new(config)?;

    // Start server
    server::serve(ctx).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
    __                        __    _       __
   / /   ____  _______  _______/ /   (_)___  / /_______
  / /   / __ \/ ___/ / / / ___/ /   / / __ \/ //_/ ___/
 / /___/ /_/ / /__/ /_/ (__  ) /___/ / / / / ,< (__  )
/_____/\____/\___/\__,_/____/_____/_/_/ /_/_/|_/____/

        Federated reference resolver v{}
        "#,
        env!("CARGO_PKG_VERSION")
    );
}
