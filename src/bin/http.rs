#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;
    use std::path::PathBuf;

    use workforce_plan::{http_api, logging};

    logging::init();

    let addr: SocketAddr = std::env::var("WORKFORCE_PLAN_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    let export_dir = PathBuf::from(
        std::env::var("WORKFORCE_PLAN_EXPORT_DIR").unwrap_or_else(|_| "exports".to_string()),
    );

    println!("workforce-plan HTTP API listening on http://{addr}");
    http_api::serve(addr, export_dir).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
