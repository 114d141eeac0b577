use eyre::Report;

#[tokio::main]
async fn main() -> Result<(), Report> {
    finsync::run().await
}
