use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use kd_dice::{DEFAULT_FACES, DieDenomination, Ledger, Roll, RollBatch, Term};
use kd_karma::{
    ChatMessageData, Host, IdentityPolicy, KarmicDice, MemoryHost, Resolver, RollOptions,
    Translations, label_for,
};

/// Arguments of `karmic roll`.
pub struct RollArgs {
    pub pool: Vec<String>,
    pub times: u32,
    pub seed: u64,
    pub system: Option<String>,
    pub config: Option<PathBuf>,
    pub tables: Option<PathBuf>,
    pub json: bool,
}

pub fn run(args: &RollArgs) -> Result<(), String> {
    let pool = args
        .pool
        .iter()
        .map(|item| DieDenomination::parse_pool_item(item).map_err(|e| e.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    let config = super::load_config(args.config.as_deref())?;
    let tables = super::load_tables(args.tables.as_deref())?;

    let mut host = MemoryHost::standard(&tables, args.seed);
    if let Some(system) = &args.system {
        host = host.with_system_id(system.as_str());
    }

    let resolver = Resolver::new(Arc::new(tables), Arc::new(Translations::english()));
    let mut module = KarmicDice::new(
        config,
        Arc::new(Ledger::new()),
        Arc::new(IdentityPolicy),
        resolver.clone(),
    );
    module.init();
    module.ready(&mut host);

    if !module.is_active() {
        println!(
            "  {} karmic dice idle for system '{}'",
            "NOTE".yellow().bold(),
            host.system_id()
        );
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("cannot start runtime: {e}"))?;

    for n in 1..=args.times {
        let batch = runtime.block_on(roll_pool(&host, &pool))?;
        let mut message = ChatMessageData::new(format!("<p>Roll {n}</p>"), &batch)
            .map_err(|e| e.to_string())?;
        let annotated = module.pre_create_chat_message(&mut message);

        if !args.json {
            print_roll(n, &batch, &resolver, annotated);
        }
    }

    if args.json {
        let snapshot = module.ledger().snapshot();
        let json = serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        println!();
        print_ledger(module.ledger());
    }

    Ok(())
}

async fn roll_pool(
    host: &MemoryHost,
    pool: &[(u32, DieDenomination)],
) -> Result<RollBatch, String> {
    let registry = host
        .registry()
        .ok_or_else(|| "host has no die class registry".to_string())?;
    let mut terms = Vec::with_capacity(pool.len());
    for (count, denom) in pool {
        let class = registry
            .for_denomination(denom)
            .ok_or_else(|| format!("no die class for '{denom}'"))?;
        let mut results = Vec::with_capacity(*count as usize);
        for _ in 0..*count {
            let outcome = class
                .roll(RollOptions::default())
                .await
                .map_err(|e| e.to_string())?;
            results.push(outcome);
        }
        let faces = class.faces().unwrap_or(DEFAULT_FACES);
        terms.push(Term::new(denom.clone(), faces, results));
    }
    Ok(RollBatch::new(vec![Roll::new(terms)]))
}

fn print_roll(n: u32, batch: &RollBatch, resolver: &Resolver, annotated: bool) {
    let mut parts = Vec::new();
    for term in batch.rolls.iter().flat_map(|r| r.terms.iter()) {
        let Some(denom) = &term.denomination else {
            continue;
        };
        let faces: Vec<String> = term
            .results
            .iter()
            .map(|o| {
                let label = resolver
                    .face_label(denom, o.result)
                    .unwrap_or_else(|_| format!("Face {}", o.result));
                if o.is_adjusted() {
                    format!("{label}*")
                } else {
                    label
                }
            })
            .collect();
        let name = label_for(denom);
        parts.push(format!("{} [{}]", name.as_str().bold(), faces.join(", ")));
    }
    let changes = batch.changes().len();
    let status = if annotated {
        format!("({changes} adjusted)").as_str().yellow()
    } else {
        "(no adjustments)".dimmed()
    };
    println!("  Roll {n:>3}: {} {status}", parts.join("  "));
}

fn print_ledger(ledger: &Ledger) {
    let snapshot = ledger.snapshot();
    if snapshot.is_empty() {
        println!("  No rolls recorded.");
        return;
    }

    println!("  {}", "Roll Ledger".bold().underline());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Die", "Faces", "Rolls", "Face counts"]);
    for (denom, entry) in &snapshot {
        let counts: Vec<String> = entry
            .counts
            .iter()
            .map(|(face, n)| format!("{face}:{n}"))
            .collect();
        table.add_row(vec![
            label_for(denom),
            entry.faces.to_string(),
            entry.rolls.to_string(),
            counts.join(" "),
        ]);
    }
    println!("{table}");
    println!();
    println!("  {} rolls recorded", ledger.total_rolls());
}
