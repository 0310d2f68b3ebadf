mod common;
use ertrag::chart::ChartKind;
use ertrag::{Ertrag, SessionState, companies};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let ertrag = Ertrag::builder()
        .with_connector(common::get_connector())
        .build()?;

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "SAP".to_string());
    let company = companies::by_symbol(&symbol).ok_or_else(|| format!("unknown symbol {symbol}"))?;
    // Last completed year; the current one is usually partial.
    let years = ertrag.config().years;
    let year = years.newest_first().nth(1).unwrap_or(years.max);

    let session = ertrag.analyze(&company, year).await;
    match session.state() {
        SessionState::Loading => println!("Loading earnings data..."),
        SessionState::Failed(e) => eprintln!("Failed to load earnings: {e}"),
        SessionState::Empty => println!("No earnings data available for {company} in {year}."),
        SessionState::Loaded(_) => {
            println!("Earnings for {company} in {year}:");
            for row in session.table() {
                println!(
                    "{:>13}  {:<9}  {:<8}  prev {:>9}  close {:>9}  {:>16}  high {:>7}  low {:>7}",
                    row.report_date,
                    row.report_type.to_string(),
                    row.sentiment.to_string(),
                    row.previous_close,
                    row.day_close,
                    row.price_change,
                    row.high_change,
                    row.low_change,
                );
            }
            for kind in ChartKind::ALL {
                if let Some(chart) = session.chart(kind) {
                    println!("\n{} [{}]", chart.title, chart.y_axis);
                    for ds in &chart.datasets {
                        let values: Vec<String> =
                            ds.values.iter().map(|v| format!("{v:.2}")).collect();
                        println!("  {}: {}", ds.label, values.join(", "));
                    }
                }
            }
        }
    }

    Ok(())
}
