mod common;
use common::get_connectors;
use reelprice::{Reel, ReelConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let title = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Star Wars: Episode VI - Return of the Jedi".to_string());

    // Served preset: bounded retries and an overall deadline.
    let reel = get_connectors()
        .into_iter()
        .fold(Reel::builder().config(ReelConfig::served()), |b, c| {
            b.with_connector(c)
        })
        .build()?;

    let index = reel.build_index().await?;
    match reel.cheapest(&title, &index).await {
        Ok(best) => println!(
            "Cheapest price for {title}: {} ({} {})",
            best.price, best.provider, best.id
        ),
        Err(e) if e.is_not_found() => println!("{title} not found"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
