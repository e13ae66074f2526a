use std::io::BufReader;
use vypiskalib::{
    formats::{camt053::Camt053, revolut::Revolut},
    model::Account,
    statement,
    traits::WriteFormat,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: CSV Revolut со stdin -> camt.053 в stdout.
    let rows = Revolut::read(BufReader::new(std::io::stdin()))?;
    let st = statement::build(
        rows,
        Account {
            iban: "LT601010012345678901".into(),
            owner: "Company s.r.o.".into(),
            address: ["Street number".into(), "City, Post Code".into()],
        },
    )?;
    Camt053::write(std::io::stdout(), &st)?;
    Ok(())
}
