mod common;
use ertrag::{Ertrag, companies};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let ertrag = Ertrag::builder()
        .with_connector(common::get_connector())
        .build()?;

    let company = companies::by_symbol("BMW").ok_or("BMW missing from registry")?;
    let session = ertrag.analyze(&company, 2023).await;

    match session.export_csv()? {
        Some(export) => {
            let path = std::env::temp_dir().join(&export.file_name);
            std::fs::write(&path, &export.content)?;
            println!("Wrote {}:\n{}", path.display(), export.content);
        }
        None => println!("Nothing to export: {:?}", session.state()),
    }

    Ok(())
}
