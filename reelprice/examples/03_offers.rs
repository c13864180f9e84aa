mod common;
use common::get_connectors;
use reelprice::Reel;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let reel = get_connectors()
        .into_iter()
        .fold(Reel::builder(), |b, c| b.with_connector(c))
        .build()?;
    let index = reel.build_index().await?;

    // Every provider's full record for the first listed title.
    let (title, _) = index.iter().next().ok_or("no movies listed")?;
    println!("Offers for {title}:");
    for detail in reel.offers(title.as_str(), &index).await? {
        let price = detail.movie.price.as_deref().unwrap_or("n/a");
        println!("  {:<12} {:<10} {price}", detail.movie.provider.to_string(), detail.movie.id);
        for (key, value) in &detail.attributes {
            println!("      {key}: {value}");
        }
    }

    Ok(())
}
