use strapi_http::Http;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let http = Http::from_env();
    let page = http.fetch_home_page().await?;
    println!("{}", serde_json::to_string_pretty(&page)?);

    Ok(())
}
