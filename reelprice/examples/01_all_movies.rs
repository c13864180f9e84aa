mod common;
use common::get_connectors;
use reelprice::Reel;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Register both providers.
    let reel = get_connectors()
        .into_iter()
        .fold(Reel::builder(), |b, c| b.with_connector(c))
        .build()?;

    // 2. Fetch and merge both catalogs.
    let index = reel.build_index().await?;

    // 3. One line per distinct title, with the providers listing it.
    for (i, (title, records)) in index.iter().enumerate() {
        let providers: Vec<String> = records.iter().map(|r| r.provider.to_string()).collect();
        println!("{:>2}. {title} [{}]", i + 1, providers.join(", "));
    }

    Ok(())
}
