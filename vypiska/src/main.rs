use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::process;
use vypiskalib::{
    error::Result,
    formats::{camt053::Camt053, html::HtmlReport, revolut::Revolut},
    model::Account,
    statement,
    traits::WriteFormat,
};

#[derive(Parser, Debug)]
#[command(
    name = "vypiska",
    version,
    about = "Конвертация выписки Revolut Business в CSOB camt.053.001.02"
)]
struct Cli {
    /// IBAN счёта Revolut Business
    #[arg(long)]
    iban: String,

    /// Входной CSV-файл
    #[arg(short = 'i', long)]
    input: String,

    /// Путь к XML (по умолчанию — автоимя из IBAN и периода)
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Дополнительно сгенерировать HTML-отчёт
    #[arg(long)]
    html: bool,

    /// Только HTML-отчёт, без XML
    #[arg(long)]
    html_only: bool,

    /// Владелец счёта
    #[arg(long, default_value = "Company s.r.o.")]
    owner: String,

    /// Адрес владельца, строка 1
    #[arg(long, default_value = "Street number")]
    addr_line1: String,

    /// Адрес владельца, строка 2
    #[arg(long, default_value = "City, Post Code")]
    addr_line2: String,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let file = File::open(&cli.input)?;
    let rows = Revolut::read(BufReader::new(file))?;

    let account = Account {
        iban: cli.iban,
        owner: cli.owner,
        address: [cli.addr_line1, cli.addr_line2],
    };
    let st = statement::build(rows, account)?;

    let base_name = format!(
        "{}_{}_{}",
        st.account.iban,
        st.period.from.format("%Y%m%d"),
        st.period.to.format("%Y%m%d"),
    );

    if !cli.html_only {
        let path = cli.output.unwrap_or_else(|| format!("{base_name}.xml"));
        Camt053::write(File::create(&path)?, &st)?;
        println!(
            "Converted {} transactions ({} CRDT, {} DBIT) -> {}",
            st.entries.len(),
            st.totals.credit_count,
            st.totals.debit_count,
            path
        );
    }

    if cli.html || cli.html_only {
        let path = format!("{base_name}.html");
        HtmlReport::write(File::create(&path)?, &st)?;
        println!("HTML statement generated -> {path}");
    }

    Ok(())
}
