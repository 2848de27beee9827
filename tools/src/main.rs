//! calc-runner: headless front end for the upgrade cost calculators.
//!
//! Usage:
//!   calc-runner --domain fire_crystals --entity Furnace --from F30 --to FC2
//!   calc-runner --domain charms --from 3 --to 9 --data-dir ./data
//!   calc-runner --ipc-mode

use anyhow::{Context, Result};
use frostcalc_core::{
    defaults,
    loader::{tables_from_delimited, DomainFile},
    plan::{PlanStep, UpgradePlan},
    CostBook, Domain, DomainTables, Totals,
};
use std::collections::BTreeMap;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Domains,
    SumRange {
        domain: Domain,
        #[serde(default)]
        entity: Option<String>,
        from:   String,
        to:     String,
    },
    Plan {
        domain: Domain,
        steps:  Vec<PlanStep>,
        #[serde(default)]
        inventory: BTreeMap<String, u64>,
    },
    Reload,
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = str_arg(&args, "--data-dir").unwrap_or("./data").to_string();

    let mut book = load_book(Path::new(&data_dir))?;

    if ipc_mode {
        return run_ipc_loop(&mut book, &data_dir);
    }

    let domain: Domain = str_arg(&args, "--domain")
        .unwrap_or("fire_crystals")
        .parse()?;
    let entity = str_arg(&args, "--entity");
    let (Some(from), Some(to)) = (str_arg(&args, "--from"), str_arg(&args, "--to")) else {
        anyhow::bail!("--from and --to are required outside --ipc-mode");
    };

    println!("Upgrade cost: {domain}");
    println!("  entity: {}", entity.unwrap_or("-"));
    println!("  range:  {from} → {to}");
    println!();

    match book.sum_range(domain, entity, from, to)? {
        Some(totals) => print_totals(&totals),
        None => println!("  invalid range"),
    }
    Ok(())
}

/// Read every domain's data from `data_dir`, falling back to built-in tables.
fn load_book(data_dir: &Path) -> Result<CostBook> {
    let mut book = CostBook::new();
    for domain in Domain::ALL {
        match load_domain(data_dir, domain)? {
            Some(tables) => {
                book.replace(tables);
            }
            None => log::warn!("{domain}: no data file in {} and no defaults", data_dir.display()),
        }
    }
    Ok(book)
}

fn load_domain(data_dir: &Path, domain: Domain) -> Result<Option<DomainTables>> {
    let json_path = data_dir.join(format!("{}.json", domain.name()));
    if json_path.exists() {
        let text = std::fs::read_to_string(&json_path)
            .with_context(|| format!("Cannot read {}", json_path.display()))?;
        let file = DomainFile::from_json(&text)
            .with_context(|| format!("Cannot parse {}", json_path.display()))?;
        if file.domain != domain {
            anyhow::bail!("{} declares domain {}", json_path.display(), file.domain);
        }
        return Ok(Some(file.into_tables()?));
    }

    let csv_path = data_dir.join(format!("{}.csv", domain.name()));
    if csv_path.exists() {
        let text = std::fs::read_to_string(&csv_path)
            .with_context(|| format!("Cannot read {}", csv_path.display()))?;
        let tables = tables_from_delimited(domain, &text)
            .with_context(|| format!("Cannot parse {}", csv_path.display()))?;
        return Ok(Some(tables));
    }

    log::debug!("{domain}: using built-in tables");
    Ok(defaults::tables(domain)?)
}

fn run_ipc_loop(book: &mut CostBook, data_dir: &str) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                reply(&mut stdout, &serde_json::json!({ "error": e.to_string() }))?;
                continue;
            }
        };

        let response = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Domains => domains_state(book),
            IpcCommand::SumRange { domain, entity, from, to } => {
                match book.get(domain) {
                    Ok(tables) => {
                        let query = frostcalc_core::RangeQuery::new(entity.as_deref(), &from, &to);
                        match tables.try_sum(&query) {
                            Ok(totals) => serde_json::json!({ "domain": domain, "totals": totals }),
                            Err(e) => serde_json::json!({
                                "domain": domain,
                                "totals": null,
                                "error":  e.to_string(),
                            }),
                        }
                    }
                    Err(e) => serde_json::json!({ "error": e.to_string() }),
                }
            }
            IpcCommand::Plan { domain, steps, inventory } => match book.get(domain) {
                Ok(tables) => {
                    let report = UpgradePlan { steps }.evaluate(&tables);
                    let owned = Totals::from_pairs(
                        domain,
                        inventory.iter().map(|(field, amount)| (field.as_str(), *amount)),
                    );
                    serde_json::json!({
                        "domain":    domain,
                        "report":    report,
                        "shortfall": report.shortfall(&owned),
                    })
                }
                Err(e) => serde_json::json!({ "error": e.to_string() }),
            },
            IpcCommand::Reload => match load_book(Path::new(data_dir)) {
                Ok(fresh) => {
                    *book = fresh;
                    domains_state(book)
                }
                Err(e) => {
                    log::warn!("reload failed, keeping previous tables: {e:#}");
                    serde_json::json!({ "error": format!("{e:#}") })
                }
            },
        };
        reply(&mut stdout, &response)?;
    }
    Ok(())
}

fn domains_state(book: &CostBook) -> serde_json::Value {
    let domains: Vec<&str> = book.domains().map(|d| d.name()).collect();
    serde_json::json!({ "domains": domains })
}

fn reply(stdout: &mut io::Stdout, value: &serde_json::Value) -> Result<()> {
    writeln!(stdout, "{value}")?;
    stdout.flush()?;
    Ok(())
}

fn print_totals(totals: &Totals) {
    for (field, amount) in totals.iter() {
        println!("  {field:<10} {amount}");
    }
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
