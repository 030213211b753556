#[tokio::main]
async fn main() -> taxon_owl::Result<()> {
    taxon_owl::cli::main().await
}
