use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    browser_deps_lib::main().await
}
